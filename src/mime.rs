/// Maps a file name's extension to the MIME type served for it.
///
/// Shared contract with the other image-serving endpoints: only `webp`,
/// `png` and `jpg` are recognized; anything else is served as a generic
/// binary stream.
pub fn mime_for_extension(name: &str) -> &'static str {
    let ext = name
        .rsplit('.')
        .next()
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    match ext.as_str() {
        "webp" => "image/webp",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_extensions_map_to_image_types() {
        assert_eq!(mime_for_extension("bg.webp"), "image/webp");
        assert_eq!(mime_for_extension("card.PNG"), "image/png");
        assert_eq!(mime_for_extension("photo.jpg"), "image/jpeg");
        assert_eq!(mime_for_extension("photo.JPEG"), "image/jpeg");
    }

    #[test]
    fn unknown_extensions_fall_back_to_octet_stream() {
        assert_eq!(mime_for_extension("card.bmp"), "application/octet-stream");
        assert_eq!(mime_for_extension("no-extension"), "application/octet-stream");
        assert_eq!(mime_for_extension(""), "application/octet-stream");
    }
}
