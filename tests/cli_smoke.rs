use std::{io::Cursor, path::PathBuf};

use posterforge::MediaRecord;

fn exe() -> PathBuf {
    std::env::var_os("CARGO_BIN_EXE_posterforge")
        .map(PathBuf::from)
        .unwrap_or_else(|| {
            let mut p = PathBuf::from("target").join("debug");
            p.push(if cfg!(windows) {
                "posterforge.exe"
            } else {
                "posterforge"
            });
            p
        })
}

#[test]
fn cli_render_writes_jpeg() {
    let dir = PathBuf::from("target").join("cli_smoke");
    std::fs::create_dir_all(&dir).unwrap();

    let record_path = dir.join("record.json");
    let out_path = dir.join("out").join("poster.jpg");
    let _ = std::fs::remove_file(&out_path);

    let img = image::RgbImage::from_pixel(30, 45, image::Rgb([90, 40, 160]));
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgb8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    std::fs::write(dir.join("cover.png"), &buf).unwrap();

    let record = MediaRecord {
        display_title: "Cowboy Bebop".to_string(),
        cover_image_ref: "cover.png".to_string(),
        backdrop_image_ref: None,
        period_label: "Spring 1998".to_string(),
        episode_count: Some(26),
        format_label: "Tv".to_string(),
        score_percent: Some(86),
        genres: vec!["Action".to_string(), "Sci-Fi".to_string()],
    };
    let f = std::fs::File::create(&record_path).unwrap();
    serde_json::to_writer_pretty(f, &record).unwrap();

    let record_arg = record_path.to_string_lossy().to_string();
    let out_arg = out_path.to_string_lossy().to_string();

    let status = std::process::Command::new(exe())
        .args(["render", "--record", record_arg.as_str(), "--branding", "Bebop Club"])
        .args(["--out", out_arg.as_str()])
        .status()
        .unwrap();

    assert!(status.success());
    let bytes = std::fs::read(&out_path).unwrap();
    let decoded = image::load_from_memory(&bytes).unwrap();
    assert_eq!((decoded.width(), decoded.height()), (1280, 720));
}

#[test]
fn cli_render_reports_missing_record() {
    let status = std::process::Command::new(exe())
        .args(["render", "--record", "target/cli_smoke/does_not_exist.json"])
        .args(["--out", "target/cli_smoke/never.jpg"])
        .status()
        .unwrap();
    assert!(!status.success());
}
