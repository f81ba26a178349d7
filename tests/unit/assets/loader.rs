use std::io::Cursor;

use super::*;

fn temp_dir(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!(
        "scroll_sequence_{name}_{}_{}",
        std::process::id(),
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ))
}

fn write_png(path: &Path, rgba: [u8; 4]) {
    let img = image::RgbaImage::from_raw(1, 1, rgba.to_vec()).unwrap();
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    std::fs::write(path, &buf).unwrap();
}

#[test]
fn load_is_pending_until_poll() {
    let tmp = temp_dir("loader_pending");
    std::fs::create_dir_all(tmp.join("seq")).unwrap();
    write_png(&tmp.join("seq/00000.png"), [1, 2, 3, 255]);

    let mut loader = FsImageLoader::new(&tmp);
    let h = loader.load("seq/00000.png");
    assert!(h.is_pending());
    assert_eq!(loader.queued(), 1);
    assert_eq!(loader.issued(), 1);

    assert_eq!(loader.poll(), 1);
    assert!(h.is_ready());
    assert_eq!(h.image().unwrap().width, 1);
    assert_eq!(loader.queued(), 0);
    assert_eq!(loader.poll(), 0);

    std::fs::remove_dir_all(&tmp).ok();
}

#[test]
fn missing_and_remote_sources_fail_without_panicking() {
    let tmp = temp_dir("loader_fail");
    std::fs::create_dir_all(&tmp).unwrap();

    let mut loader = FsImageLoader::new(&tmp);
    let missing = loader.load("nope/00001.jpg");
    let remote = loader.load("https://cdn.example/seq/00001.jpg");
    loader.poll();

    assert!(missing.is_failed());
    assert!(remote.is_failed());

    std::fs::remove_dir_all(&tmp).ok();
}

#[test]
fn leading_slash_resolves_under_root() {
    let loader = FsImageLoader::new("/srv/site");
    assert_eq!(
        loader.resolve_path("/seq/00004.jpg").unwrap(),
        PathBuf::from("/srv/site/seq/00004.jpg")
    );
    assert!(loader.resolve_path("/").is_err());
}

#[test]
fn batch_completes_every_handle() {
    let tmp = temp_dir("loader_batch");
    std::fs::create_dir_all(&tmp).unwrap();
    for i in 0..8u8 {
        write_png(&tmp.join(format!("{i:03}.png")), [i, i, i, 255]);
    }

    let mut loader = FsImageLoader::new(&tmp);
    let handles: Vec<_> = (0..8).map(|i| loader.load(&format!("{i:03}.png"))).collect();
    assert_eq!(loader.poll(), 8);
    for (i, h) in handles.iter().enumerate() {
        let img = h.image().unwrap();
        assert_eq!(img.rgba8_premul[0], i as u8);
    }

    std::fs::remove_dir_all(&tmp).ok();
}
