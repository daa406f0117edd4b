//! Tar parsing, image indexing, and nearest-lookup integration tests.

use async_trait::async_trait;
use bytes::Bytes;

use cinemask::{
    archive::{
        extract_images_from_url, find_closest_image, parse_archive, process_records,
        ArchiveFetcher,
    },
    error::{ExtractError, FetchError},
};

use super::test_utils::{tar_archive, tar_header, BLOCK};

struct StaticFetcher(Bytes);

#[async_trait]
impl ArchiveFetcher for StaticFetcher {
    async fn fetch(&self, _url: &str) -> Result<Bytes, FetchError> {
        Ok(self.0.clone())
    }
}

struct FailingFetcher;

#[async_trait]
impl ArchiveFetcher for FailingFetcher {
    async fn fetch(&self, url: &str) -> Result<Bytes, FetchError> {
        Err(FetchError::Status {
            url: url.to_string(),
            status: 502,
        })
    }
}

// =============================================================================
// Tar Parsing
// =============================================================================

#[test]
fn test_single_entry_archive_parses_and_indexes() {
    // One regular file, 10 payload bytes, correct padding, terminating
    // zero blocks. The record survives parsing intact and its name
    // carries the (0, 3) grid position.
    let payload = b"0123456789";
    let archive = tar_archive(&[("a_0_3.jpg", payload.as_slice())]);

    let records = parse_archive(&archive);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].name, "a_0_3.jpg");
    assert_eq!(records[0].size, 10);
    assert_eq!(records[0].data.as_ref(), payload);

    let extracted = process_records(records);
    assert_eq!(extracted.len(), 1);
    assert_eq!(
        (extracted.images[0].frame, extracted.images[0].slice),
        (0, 3)
    );
}

#[test]
fn test_directory_entries_are_skipped() {
    let mut buf = Vec::new();
    buf.extend_from_slice(&tar_header("scans/", 0, b'5'));
    buf.extend_from_slice(&tar_header("scans/pat_0_0.png", 4, b'0'));
    buf.extend_from_slice(b"abcd");
    buf.extend(std::iter::repeat(0u8).take(BLOCK - 4));
    buf.extend_from_slice(&[0u8; BLOCK]);
    buf.extend_from_slice(&[0u8; BLOCK]);

    let records = parse_archive(&Bytes::from(buf));
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].name, "scans/pat_0_0.png");
}

#[test]
fn test_parse_stops_at_zero_block() {
    let mut buf = tar_archive(&[("pat_0_0.png", b"aa".as_slice())]).to_vec();
    // Anything after the terminator is ignored.
    buf.extend_from_slice(&tar_header("pat_0_1.png", 2, b'0'));
    buf.extend_from_slice(b"bb");
    buf.extend(std::iter::repeat(0u8).take(BLOCK - 2));

    let records = parse_archive(&Bytes::from(buf));
    assert_eq!(records.len(), 1);
}

// =============================================================================
// End-to-End Extraction
// =============================================================================

#[tokio::test]
async fn test_extract_filters_sorts_and_resolves_handles() {
    let archive = tar_archive(&[
        ("pat_cine_1_0.png", b"frame1".as_slice()),
        ("manifest.json", b"{}".as_slice()),
        ("pat_cine_0_1.jpg", b"frame0b".as_slice()),
        ("pat_cine_0_0.jpeg", b"frame0a".as_slice()),
        ("pat_cine_oops.png", b"dropped".as_slice()),
    ]);
    let fetcher = StaticFetcher(archive);

    let extracted = extract_images_from_url(&fetcher, "http://backend/archive.tar")
        .await
        .unwrap();

    let grid: Vec<(u32, u32)> = extracted
        .images
        .iter()
        .map(|i| (i.frame, i.slice))
        .collect();
    assert_eq!(grid, vec![(0, 0), (0, 1), (1, 0)]);

    let first = &extracted.images[0];
    assert_eq!(extracted.data(first).unwrap().as_ref(), b"frame0a");
}

#[tokio::test]
async fn test_extract_fetch_failure_propagates() {
    let result = extract_images_from_url(&FailingFetcher, "http://backend/archive.tar").await;
    assert!(matches!(
        result,
        Err(ExtractError::Fetch(FetchError::Status { status: 502, .. }))
    ));
}

#[tokio::test]
async fn test_extract_zero_matches_is_success() {
    let archive = tar_archive(&[("report.pdf", b"pdf".as_slice())]);
    let fetcher = StaticFetcher(archive);

    let extracted = extract_images_from_url(&fetcher, "http://backend/archive.tar")
        .await
        .unwrap();
    assert!(extracted.is_empty());
}

#[tokio::test]
async fn test_dispose_all_releases_handles_idempotently() {
    let archive = tar_archive(&[("pat_cine_0_0.png", b"payload".as_slice())]);
    let fetcher = StaticFetcher(archive);

    let mut extracted = extract_images_from_url(&fetcher, "http://backend/archive.tar")
        .await
        .unwrap();
    let image = extracted.images[0].clone();
    assert!(extracted.data(&image).is_some());

    extracted.dispose_all();
    assert!(extracted.data(&image).is_none());

    extracted.dispose_all();
    assert!(extracted.data(&image).is_none());
}

// =============================================================================
// Nearest Lookup
// =============================================================================

#[tokio::test]
async fn test_closest_lookup_over_extracted_grid() {
    let archive = tar_archive(&[
        ("pat_cine_0_0.png", b"a".as_slice()),
        ("pat_cine_0_2.png", b"b".as_slice()),
        ("pat_cine_4_0.png", b"c".as_slice()),
        ("pat_cine_4_2.png", b"d".as_slice()),
    ]);
    let fetcher = StaticFetcher(archive);
    let extracted = extract_images_from_url(&fetcher, "http://backend/archive.tar")
        .await
        .unwrap();

    let exact = find_closest_image(&extracted.images, 4, 2).unwrap();
    assert_eq!((exact.frame, exact.slice), (4, 2));

    let near = find_closest_image(&extracted.images, 1, 2).unwrap();
    assert_eq!((near.frame, near.slice), (0, 2));
}

#[test]
fn test_closest_sparse_diagonal_has_no_answer() {
    // Images at (0,0) and (2,2) only: the nearest frame and nearest slice
    // are found independently, and no image exists at the derived pair.
    let records = parse_archive(&tar_archive(&[
        ("pat_cine_0_0.png", b"a".as_slice()),
        ("pat_cine_2_2.png", b"b".as_slice()),
    ]));
    let extracted = process_records(records);

    assert!(find_closest_image(&extracted.images, 1, 1).is_none());
}
