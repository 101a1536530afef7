//! Fetching the routing information base from the kernel.

/// `NET_RT_DUMP`: dump the routing table
pub const NET_RT_DUMP: i32 = 1;

/// The kernel refused or could not serve a routing table request
#[derive(Debug, thiserror::Error)]
pub enum SystemCallError {
    #[error("sysctl({step}) failed: {source}")]
    Sysctl {
        step: &'static str,
        #[source]
        source: std::io::Error,
    },
    #[error("the routing socket sysctl is only available on macOS")]
    Unsupported,
}

/// Fetch a routing information base of `kind` for address `family` from the
/// kernel.  `flags` narrows the dump; 0 means everything.
///
/// # Errors
///
/// Returns an error if either `sysctl` call fails, e.g. for lack of
/// permission, or on platforms without the Darwin routing socket.
#[cfg(any(target_os = "macos", target_os = "ios"))]
pub fn fetch_rib(family: i32, kind: i32, flags: i32) -> Result<Vec<u8>, SystemCallError> {
    let mut mib: [libc::c_int; 6] = [libc::CTL_NET, libc::PF_ROUTE, 0, family, kind, flags];
    let mut len: libc::size_t = 0;

    // SAFETY: a null buffer asks only for the required size, written to `len`.
    let err = unsafe {
        libc::sysctl(
            mib.as_mut_ptr(),
            6,
            std::ptr::null_mut(),
            &mut len,
            std::ptr::null_mut(),
            0,
        )
    };
    if err != 0 {
        return Err(SystemCallError::Sysctl {
            step: "estimate",
            source: std::io::Error::last_os_error(),
        });
    }
    if len == 0 {
        return Ok(Vec::new());
    }

    let mut buf = vec![0u8; len];
    // SAFETY: `buf` is `len` bytes long and the kernel writes at most `len`.
    let err = unsafe {
        libc::sysctl(
            mib.as_mut_ptr(),
            6,
            buf.as_mut_ptr().cast(),
            &mut len,
            std::ptr::null_mut(),
            0,
        )
    };
    if err != 0 {
        return Err(SystemCallError::Sysctl {
            step: "dump",
            source: std::io::Error::last_os_error(),
        });
    }
    buf.truncate(len);

    tracing::debug!(bytes = buf.len(), "fetched routing table");
    Ok(buf)
}

/// Fetch a routing information base from the kernel.
///
/// # Errors
///
/// Always fails: this platform has no Darwin routing socket.
#[cfg(not(any(target_os = "macos", target_os = "ios")))]
pub fn fetch_rib(_family: i32, _kind: i32, _flags: i32) -> Result<Vec<u8>, SystemCallError> {
    Err(SystemCallError::Unsupported)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::address::AF_INET;

    #[test]
    #[cfg(any(target_os = "macos", target_os = "ios"))]
    fn live_dump() {
        let rib = fetch_rib(i32::from(AF_INET), NET_RT_DUMP, 0).expect("fetch routing table");
        assert!(!rib.is_empty());
    }

    #[test]
    #[cfg(not(any(target_os = "macos", target_os = "ios")))]
    fn unsupported() {
        let err = fetch_rib(i32::from(AF_INET), NET_RT_DUMP, 0).unwrap_err();
        assert!(matches!(err, SystemCallError::Unsupported));
        // Coverage of display formatting
        let _ = err.to_string();
    }
}
