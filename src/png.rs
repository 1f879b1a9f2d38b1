//! PNG encoding for rendered figures.
//!
//! Figures are written as 8-bit RGB (color type 2). The dpi goes into a
//! `pHYs` chunk and textual metadata such as the title into `tEXt` chunks.

use std::io::{self, Write};

const SIGNATURE: [u8; 8] = [137, 80, 78, 71, 13, 10, 26, 10];

const METRES_PER_INCH: f64 = 0.0254;

/// Encodes `pixels` (3 bytes per pixel, row-major, top row first)
pub fn encode_rgb(
    pixels: &[u8],
    width: usize,
    height: usize,
    dpi: u32,
    text: &[(&str, &str)],
) -> io::Result<Vec<u8>> {
    if pixels.len() != width * height * 3 {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!(
                "expected {} bytes of RGB data for {}x{}, got {}",
                width * height * 3,
                width,
                height,
                pixels.len()
            ),
        ));
    }

    let mut png = Vec::new();
    png.extend_from_slice(&SIGNATURE);

    let mut ihdr = Vec::with_capacity(13);
    ihdr.extend_from_slice(&(width as u32).to_be_bytes());
    ihdr.extend_from_slice(&(height as u32).to_be_bytes());
    ihdr.push(8); // bit depth
    ihdr.push(2); // color type (RGB)
    ihdr.push(0); // compression method
    ihdr.push(0); // filter method
    ihdr.push(0); // interlace method
    write_chunk(&mut png, b"IHDR", &ihdr);

    let ppm = (f64::from(dpi) / METRES_PER_INCH).round() as u32;
    let mut phys = Vec::with_capacity(9);
    phys.extend_from_slice(&ppm.to_be_bytes());
    phys.extend_from_slice(&ppm.to_be_bytes());
    phys.push(1); // unit is the metre
    write_chunk(&mut png, b"pHYs", &phys);

    for (keyword, value) in text {
        write_chunk(&mut png, b"tEXt", &text_chunk(keyword, value));
    }

    write_chunk(&mut png, b"IDAT", &deflate_idat(pixels, width, height)?);
    write_chunk(&mut png, b"IEND", &[]);

    Ok(png)
}

/// Keyword and value separated by a null byte, non Latin-1 characters replaced
fn text_chunk(keyword: &str, value: &str) -> Vec<u8> {
    let latin1 = |s: &str| {
        s.chars()
            .map(|c| if (c as u32) < 256 && c != '\0' { c as u8 } else { b'?' })
            .collect::<Vec<u8>>()
    };

    let mut data = latin1(keyword);
    data.truncate(79);
    data.push(0);
    data.extend(latin1(value));
    data
}

fn write_chunk(png: &mut Vec<u8>, chunk_type: &[u8; 4], data: &[u8]) {
    png.extend_from_slice(&(data.len() as u32).to_be_bytes());
    png.extend_from_slice(chunk_type);
    png.extend_from_slice(data);

    let mut hasher = crc32fast::Hasher::new();
    hasher.update(chunk_type);
    hasher.update(data);
    png.extend_from_slice(&hasher.finalize().to_be_bytes());
}

fn deflate_idat(pixels: &[u8], width: usize, height: usize) -> io::Result<Vec<u8>> {
    let stride = width * 3;
    let mut uncompressed = Vec::with_capacity(height * (1 + stride));

    for row in pixels.chunks_exact(stride.max(1)).take(height) {
        uncompressed.push(0); // filter type: none
        uncompressed.extend_from_slice(row);
    }

    let mut encoder = flate2::write::ZlibEncoder::new(Vec::new(), flate2::Compression::default());
    encoder.write_all(&uncompressed)?;
    encoder.finish()
}

#[cfg(test)]
mod test {
    use {super::*, flate2::read::ZlibDecoder, std::io::Read};

    /// (type, data) of every chunk after the signature
    fn chunks(png: &[u8]) -> Vec<(String, Vec<u8>)> {
        let mut out = vec![];
        let mut pos = 8;

        while pos < png.len() {
            let mut len = [0u8; 4];
            len.copy_from_slice(&png[pos..pos + 4]);
            let len = u32::from_be_bytes(len) as usize;
            let kind = String::from_utf8(png[pos + 4..pos + 8].to_vec()).unwrap();
            let data = png[pos + 8..pos + 8 + len].to_vec();

            let mut crc = [0u8; 4];
            crc.copy_from_slice(&png[pos + 8 + len..pos + 12 + len]);
            assert_eq!(
                u32::from_be_bytes(crc),
                crc32fast::hash(&png[pos + 4..pos + 8 + len])
            );

            out.push((kind, data));
            pos += 12 + len;
        }

        out
    }

    #[test]
    fn chunk_layout() {
        let pixels = [255, 0, 0, 0, 255, 0, 0, 0, 255, 10, 20, 30];
        let png = encode_rgb(&pixels, 2, 2, 100, &[("Title", "TC7 - h")]).unwrap();

        assert_eq!(&png[..8], &SIGNATURE);

        let chunks = chunks(&png);
        let kinds = chunks.iter().map(|(k, _)| k.as_str()).collect::<Vec<_>>();
        assert_eq!(kinds, vec!["IHDR", "pHYs", "tEXt", "IDAT", "IEND"]);

        assert_eq!(&chunks[0].1[..8], &[0, 0, 0, 2, 0, 0, 0, 2]);
        assert_eq!(chunks[0].1[9], 2);
        // 100 dpi is 3937 pixels per metre
        assert_eq!(&chunks[1].1[..4], &3937u32.to_be_bytes());
        assert_eq!(chunks[2].1, b"Title\0TC7 - h".to_vec());

        let mut raw = vec![];
        ZlibDecoder::new(&chunks[3].1[..])
            .read_to_end(&mut raw)
            .unwrap();
        assert_eq!(raw, vec![0, 255, 0, 0, 0, 255, 0, 0, 0, 0, 255, 10, 20, 30]);
    }

    #[test]
    fn rejects_wrong_buffer_size() {
        assert!(encode_rgb(&[0; 5], 2, 1, 100, &[]).is_err());
    }
}
