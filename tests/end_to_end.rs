//! End-to-end runs of acquisition and rendering against a file cache in a
//! temporary directory and an in-memory fetcher.

use std::fs;

use encoding_rs::SHIFT_JIS;
use tempfile::tempdir;

use holical::acquire::{AcquisitionPolicy, AcquisitionState, Consent, DatasetFetcher, FileCache};
use holical::prompt::LinePrompter;
use holical::render::CalendarRenderer;
use holical::source::{encode_for_storage, parse};
use holical::{CalendarError, Holiday, HolidayStore};

const DATASET: &str = "国民の祝日・休日月日,国民の祝日・休日名称
2025/1/1,元日
2025/1/13,成人の日
2025/2/11,建国記念の日
";

struct StaticFetcher(Vec<u8>);

impl DatasetFetcher for StaticFetcher {
    fn fetch(&self) -> Result<Vec<u8>, CalendarError> {
        Ok(self.0.clone())
    }
}

struct Offline;

impl DatasetFetcher for Offline {
    fn fetch(&self) -> Result<Vec<u8>, CalendarError> {
        Err(CalendarError::Transport("network unreachable".into()))
    }
}

fn quiet() -> LinePrompter<&'static [u8], Vec<u8>> {
    LinePrompter::new(&b""[..], Vec::new())
}

#[test]
fn january_2025_marks_exactly_two_days() {
    let store: HolidayStore = vec![
        Holiday::new(2025, 1, 1, "元日").unwrap(),
        Holiday::new(2025, 1, 13, "成人の日").unwrap(),
    ]
    .into_iter()
    .collect();
    let renderer = CalendarRenderer::default();
    let view = renderer.render(2025, 1, &store).unwrap();

    let marked: Vec<u32> = view.cells.iter().filter(|c| c.holiday).map(|c| c.day).collect();
    assert_eq!(marked, vec![1, 13]);

    let text = view.to_string();
    assert_eq!(text.matches('*').count(), 2);
    assert!(text.contains("  1*"));
    assert!(text.contains(" 13*"));
    let listing = text.split("【祝日】\n").nth(1).unwrap();
    assert_eq!(listing, "   1日: 元日\n  13日: 成人の日\n");
}

#[test]
fn download_then_cache_hit() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("holidays.csv");
    let sjis = SHIFT_JIS.encode(DATASET).0.into_owned();

    let policy = AcquisitionPolicy::new(
        FileCache::new(&path),
        StaticFetcher(sjis),
        SHIFT_JIS,
    )
    .with_consent(Consent::Always);
    let first = policy.acquire(&mut quiet()).unwrap();
    assert_eq!(first.state, AcquisitionState::Downloaded);
    assert_eq!(first.store.len(), 3);
    assert_eq!(fs::read_to_string(&path).unwrap(), DATASET);

    // second run reads the UTF-8 cache and never touches the network
    let policy = AcquisitionPolicy::new(FileCache::new(&path), Offline, SHIFT_JIS);
    let second = policy.acquire(&mut quiet()).unwrap();
    assert_eq!(second.state, AcquisitionState::CacheHit);
    assert_eq!(
        second.store.iter().collect::<Vec<_>>(),
        first.store.iter().collect::<Vec<_>>()
    );
}

#[test]
fn offline_run_renders_without_holidays() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("missing.csv");
    let policy =
        AcquisitionPolicy::new(FileCache::new(&path), Offline, SHIFT_JIS).with_consent(Consent::Always);
    let mut prompter = quiet();
    let acq = policy.acquire(&mut prompter).unwrap();
    assert_eq!(acq.state, AcquisitionState::Failed);
    assert!(!path.exists());

    let out = String::from_utf8(prompter.into_output()).unwrap();
    assert!(out.contains("ダウンロードエラー"));
    assert!(out.contains("祝日データなしで続行します。"));

    let text = CalendarRenderer::default()
        .render(2025, 1, &acq.store)
        .unwrap()
        .to_string();
    assert!(!text.contains('*'));
    assert!(text.ends_with("【祝日】\n  なし\n"));
}

#[test]
fn interactive_decline() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("holidays.csv");
    let policy = AcquisitionPolicy::new(FileCache::new(&path), Offline, SHIFT_JIS);
    let mut prompter = LinePrompter::new(&b"n\n"[..], Vec::new());
    let acq = policy.acquire(&mut prompter).unwrap();
    assert_eq!(acq.state, AcquisitionState::NoCache);
    assert!(acq.store.is_empty());

    let out = String::from_utf8(prompter.into_output()).unwrap();
    assert!(out.contains("が見つかりません"));
    assert!(out.contains("(y/n): "));
}

#[test]
fn unreadable_cache_is_replaced_by_download() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("holidays.csv");
    // a Shift_JIS file left where the UTF-8 cache belongs
    let sjis = SHIFT_JIS.encode(DATASET).0.into_owned();
    fs::write(&path, &sjis).unwrap();

    let policy = AcquisitionPolicy::new(FileCache::new(&path), StaticFetcher(sjis), SHIFT_JIS);
    let mut prompter = LinePrompter::new(&b"y\n"[..], Vec::new());
    let acq = policy.acquire(&mut prompter).unwrap();
    assert_eq!(acq.state, AcquisitionState::Downloaded);
    assert_eq!(acq.store.len(), 3);
    assert_eq!(fs::read_to_string(&path).unwrap(), DATASET);

    let out = String::from_utf8(prompter.into_output()).unwrap();
    assert!(out.contains("読み込みエラー"));
    assert!(out.contains("(y/n): "));
}

#[test]
fn unreadable_cache_declined_renders_without_holidays() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("holidays.csv");
    fs::write(&path, [0xFFu8, 0xFE, 0x00, 0xD8]).unwrap();
    let policy = AcquisitionPolicy::new(FileCache::new(&path), Offline, SHIFT_JIS);
    let mut prompter = LinePrompter::new(&b"n\n"[..], Vec::new());
    let acq = policy.acquire(&mut prompter).unwrap();
    assert_eq!(acq.state, AcquisitionState::NoCache);
    assert!(acq.store.is_empty());
}

#[test]
fn canonical_cache_round_trip() {
    let original = parse(DATASET).holidays;
    let canonical = encode_for_storage(&original);
    assert_eq!(parse(&canonical).holidays, original);
}
