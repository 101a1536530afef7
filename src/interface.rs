//! Interface index to name resolution.

use std::{collections::HashMap, ffi::CStr, io};

/// Maps interface indexes to names
pub trait InterfaceNames {
    /// Name of the interface with `index`.
    ///
    /// # Errors
    ///
    /// Returns an error if no interface has that index, e.g. because it was
    /// removed after the routing table was dumped.
    fn name_of(&self, index: u16) -> io::Result<String>;
}

/// The live interface table, queried through `if_indextoname(3)`
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemInterfaces;

impl InterfaceNames for SystemInterfaces {
    fn name_of(&self, index: u16) -> io::Result<String> {
        let mut buf = [0 as libc::c_char; libc::IF_NAMESIZE];
        // SAFETY: `buf` holds IF_NAMESIZE bytes, the most if_indextoname writes.
        let name = unsafe { libc::if_indextoname(libc::c_uint::from(index), buf.as_mut_ptr()) };
        if name.is_null() {
            return Err(io::Error::last_os_error());
        }
        // SAFETY: on success `buf` holds a NUL-terminated name.
        let name = unsafe { CStr::from_ptr(buf.as_ptr()) };
        Ok(name.to_string_lossy().into_owned())
    }
}

/// A fixed table, for replaying captured dumps
impl InterfaceNames for HashMap<u16, String> {
    fn name_of(&self, index: u16) -> io::Result<String> {
        self.get(&index).cloned().ok_or_else(|| {
            io::Error::new(
                io::ErrorKind::NotFound,
                format!("no interface with index {index}"),
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_system_index() {
        // Index 0 never names an interface.
        assert!(SystemInterfaces.name_of(0).is_err());
    }

    #[test]
    fn fixed_table() {
        let table: HashMap<u16, String> = vec![(4, "en0".to_string())].into_iter().collect();
        assert_eq!(table.name_of(4).unwrap(), "en0");
        assert_eq!(
            table.name_of(5).unwrap_err().kind(),
            io::ErrorKind::NotFound
        );
    }
}
