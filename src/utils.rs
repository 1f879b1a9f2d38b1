use {
    byteorder::{ByteOrder, LittleEndian},
    std::{fs::File, io::Write, path::Path},
};

#[cfg(test)]
use std::io::Read;

/// Encodes `values` the way the simulator writes snapshots
pub fn f64s_to_bytes(values: &[f64]) -> Vec<u8> {
    let mut bytes = vec![0u8; values.len() * 8];
    LittleEndian::write_f64_into(values, &mut bytes);
    bytes
}

/// Writes a headerless little-endian snapshot file
pub fn write_snapshot<P: AsRef<Path>>(path: P, values: &[f64]) -> std::io::Result<()> {
    let mut f = File::create(path)?;
    f.write_all(&f64s_to_bytes(values))
}

/// Rewrites the exponent of a float printed by Rust (`1.5e-5`, `8.8e3`) with
/// an explicit sign and at least two digits (`1.5e-05`, `8.8e+03`)
pub fn pad_exponent(formatted: &str) -> String {
    match formatted.find('e') {
        Some(i) => {
            let (mantissa, exponent) = formatted.split_at(i);
            match exponent[1..].parse::<i32>() {
                Ok(exp) => format!(
                    "{}e{}{:02}",
                    mantissa,
                    if exp < 0 { '-' } else { '+' },
                    exp.abs()
                ),
                Err(_) => formatted.to_owned(),
            }
        }
        None => formatted.to_owned(),
    }
}

#[cfg(test)]
pub(crate) fn write_doubles(path: &Path, values: &[f64]) {
    write_snapshot(path, values).unwrap();
}

#[cfg(test)]
pub(crate) fn read_file<P: AsRef<Path>>(path: P) -> Vec<u8> {
    let mut f = File::open(path).unwrap();
    let mut buf = Vec::new();
    f.read_to_end(&mut buf).unwrap();
    buf
}
