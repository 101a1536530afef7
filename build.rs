fn main() -> Result<(), Box<dyn std::error::Error>> {
    let sample_path = concat!(env!("CARGO_MANIFEST_DIR"), "/sample-tables/sample-rib.hex");
    println!("cargo:rerun-if-changed={sample_path}");

    let sample_rib = std::fs::read_to_string(sample_path)?;

    // One or more hex bytes per line; `#` starts a comment.
    let mut bytes = Vec::new();
    for line in sample_rib.lines() {
        let data = line.split('#').next().unwrap_or_default();
        for byte in data.split_ascii_whitespace() {
            bytes.push(u8::from_str_radix(byte, 16)?);
        }
    }

    let sample_rib = format!("const SAMPLE_RIB: &[u8] = &{bytes:?};\n");

    let out_dir = std::env::var("OUT_DIR").expect("env OUT_DIR");
    std::fs::write(format!("{out_dir}/sample_rib.rs"), sample_rib.as_bytes())?;

    Ok(())
}
