use std::fs;
use std::path::PathBuf;

use chrono::NaiveDate;
use sha2::{Digest, Sha256};

use invoicepress::capture::{CaptureOptions, Rasterizer, SoftwareRasterizer};
use invoicepress::model::{InvoiceDocument, Theme};
use invoicepress::render::render_invoice;

fn golden_path(name: &str) -> PathBuf {
    let mut p = PathBuf::from("tests/goldens/expected");
    p.push(name);
    p
}

// The default document carries today's date; pin it so the capture is
// stable across runs.
fn pinned_document() -> InvoiceDocument {
    let mut doc = InvoiceDocument::default();
    doc.issue_date = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
    doc.due_date = Some(NaiveDate::from_ymd_opt(2024, 2, 15).unwrap());
    doc
}

fn capture_digest(theme: Theme) -> String {
    let doc = pinned_document();
    let target = render_invoice("golden", &doc, theme);
    let img = SoftwareRasterizer
        .capture(&target, &CaptureOptions { scale: 1, background: invoicepress::render::palette(theme).bg })
        .expect("capture");
    let png = img.encode_png().expect("encode");
    hex::encode(Sha256::digest(&png))
}

#[test]
fn golden_capture_matches_fixture() {
    let digest = capture_digest(Theme::Dark);

    let expected_path = golden_path("default-dark.sha256");
    if std::env::var("UPDATE_GOLDENS").is_ok() {
        fs::create_dir_all("tests/goldens/expected").ok();
        fs::write(&expected_path, &digest).expect("write golden");
        println!("Updated golden: {:?}", expected_path);
        return;
    }

    if !expected_path.exists() {
        println!(
            "No golden at {:?}; run with UPDATE_GOLDENS=1 to create it. Skipping.",
            expected_path
        );
        return;
    }

    let exp = fs::read_to_string(&expected_path).expect("unable to read golden");
    assert_eq!(digest, exp.trim());
}

#[test]
fn capture_is_deterministic() {
    assert_eq!(capture_digest(Theme::Dark), capture_digest(Theme::Dark));
}

#[test]
fn themes_produce_distinct_captures() {
    assert_ne!(capture_digest(Theme::Dark), capture_digest(Theme::Light));
}
