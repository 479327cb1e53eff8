//! Getting a holiday dataset into a [`HolidayStore`]: read the local cache
//! if there is one, otherwise ask the user whether to download it.
//!
//! Nothing here is fatal. Any failure to read, fetch, or decode the dataset
//! leaves an empty store and the calendar is shown without holidays.

use std::fs;
use std::path::{Path, PathBuf};

use encoding_rs::Encoding;
use tracing::{info, warn};

use crate::error::CalendarError;
use crate::holiday::HolidayStore;
use crate::prompt::Prompter;
use crate::source::{normalize_for_storage, parse};

/// Local copy of the dataset, stored as UTF-8 text.
pub trait HolidayCache {
    fn exists(&self) -> bool;
    fn read(&self) -> Result<String, CalendarError>;
    fn write(&self, text: &str) -> Result<(), CalendarError>;
    /// Human readable location, used in messages.
    fn describe(&self) -> String;
}

/// Retrieves the raw dataset bytes.
pub trait DatasetFetcher {
    fn fetch(&self) -> Result<Vec<u8>, CalendarError>;
}

impl<T: HolidayCache + ?Sized> HolidayCache for &T {
    fn exists(&self) -> bool {
        (**self).exists()
    }
    fn read(&self) -> Result<String, CalendarError> {
        (**self).read()
    }
    fn write(&self, text: &str) -> Result<(), CalendarError> {
        (**self).write(text)
    }
    fn describe(&self) -> String {
        (**self).describe()
    }
}

impl<T: DatasetFetcher + ?Sized> DatasetFetcher for &T {
    fn fetch(&self) -> Result<Vec<u8>, CalendarError> {
        (**self).fetch()
    }
}

/// Cache backed by a file on disk.
#[derive(Debug, Clone)]
pub struct FileCache {
    path: PathBuf,
}

impl FileCache {
    pub fn new(path: impl Into<PathBuf>) -> FileCache {
        FileCache { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl HolidayCache for FileCache {
    fn exists(&self) -> bool {
        self.path.is_file()
    }

    fn read(&self) -> Result<String, CalendarError> {
        Ok(fs::read_to_string(&self.path)?)
    }

    fn write(&self, text: &str) -> Result<(), CalendarError> {
        Ok(fs::write(&self.path, text)?)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

/// Single blocking HTTP GET.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    url: String,
    client: reqwest::blocking::Client,
}

impl HttpFetcher {
    pub fn new(url: impl Into<String>) -> HttpFetcher {
        HttpFetcher {
            url: url.into(),
            client: reqwest::blocking::Client::new(),
        }
    }
}

impl DatasetFetcher for HttpFetcher {
    fn fetch(&self) -> Result<Vec<u8>, CalendarError> {
        info!(url = %self.url, "downloading holiday dataset");
        let response = self.client.get(&self.url).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(CalendarError::Transport(format!(
                "HTTP {status} from {}",
                self.url
            )));
        }
        Ok(response.bytes()?.to_vec())
    }
}

/// How the download question is answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Consent {
    /// Ask the user.
    #[default]
    Ask,
    /// Download without asking.
    Always,
    /// Never download.
    Never,
}

/// Where acquisition ended up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AcquisitionState {
    /// No cache and no download; the store is empty by choice.
    NoCache,
    /// The cache was read.
    CacheHit,
    /// Download agreed but not yet attempted.
    NeedDownload,
    /// The dataset was downloaded.
    Downloaded,
    /// Reading or downloading failed; the store is empty.
    Failed,
}

/// Outcome of [`AcquisitionPolicy::acquire`].
#[derive(Debug)]
pub struct Acquisition {
    pub store: HolidayStore,
    pub state: AcquisitionState,
    /// Dataset rows dropped as malformed.
    pub skipped: usize,
}

/// Cache-then-download controller.
pub struct AcquisitionPolicy<C, F> {
    cache: C,
    fetcher: F,
    encoding: &'static Encoding,
    consent: Consent,
}

impl<C: HolidayCache, F: DatasetFetcher> AcquisitionPolicy<C, F> {
    pub fn new(cache: C, fetcher: F, encoding: &'static Encoding) -> Self {
        AcquisitionPolicy {
            cache,
            fetcher,
            encoding,
            consent: Consent::Ask,
        }
    }

    pub fn with_consent(mut self, consent: Consent) -> Self {
        self.consent = consent;
        self
    }

    /// Run the policy. A cache that cannot be read is treated as missing, so
    /// the download is offered and a good download replaces it. Recoverable
    /// dataset problems end in [`AcquisitionState::Failed`]; anything else,
    /// such as failing to talk to the user, is returned.
    pub fn acquire<P: Prompter + ?Sized>(
        &self,
        prompter: &mut P,
    ) -> Result<Acquisition, CalendarError> {
        let mut state = if self.cache.exists() {
            AcquisitionState::CacheHit
        } else {
            AcquisitionState::NoCache
        };
        let mut text = None;
        let mut unreadable = false;

        loop {
            state = match state {
                AcquisitionState::CacheHit => match self.cache.read() {
                    Ok(cached) => {
                        info!(cache = %self.cache.describe(), "using cached holiday dataset");
                        text = Some(cached);
                        break;
                    }
                    Err(e) if e.is_recoverable() => {
                        warn!(cache = %self.cache.describe(), error = %e, "cannot read cache");
                        prompter.say(&format!("読み込みエラー: {e}"))?;
                        unreadable = true;
                        AcquisitionState::NoCache
                    }
                    Err(e) => return Err(e),
                },
                AcquisitionState::NoCache => {
                    if !unreadable {
                        prompter.say(&format!(
                            "ローカルファイル '{}' が見つかりません。",
                            self.cache.describe()
                        ))?;
                    }
                    if self.wants_download(prompter)? {
                        AcquisitionState::NeedDownload
                    } else {
                        prompter.say("祝日データなしで続行します。")?;
                        break;
                    }
                }
                AcquisitionState::NeedDownload => {
                    prompter.say("内閣府から祝日データをダウンロード中...")?;
                    match self.download(prompter) {
                        Ok(downloaded) => {
                            text = Some(downloaded);
                            AcquisitionState::Downloaded
                        }
                        Err(e) if e.is_recoverable() => {
                            warn!(error = %e, "download failed");
                            prompter.say(&format!("ダウンロードエラー: {e}"))?;
                            prompter.say("祝日データなしで続行します。")?;
                            AcquisitionState::Failed
                        }
                        Err(e) => return Err(e),
                    }
                }
                AcquisitionState::Downloaded | AcquisitionState::Failed => break,
            };
        }

        let mut store = HolidayStore::new();
        let mut skipped = 0;
        if let Some(text) = text {
            let outcome = parse(&text);
            if outcome.skipped > 0 {
                info!(skipped = outcome.skipped, "ignored malformed dataset rows");
            }
            skipped = outcome.skipped;
            store.load(outcome.holidays);
            prompter.say(&format!("祝日データを読み込みました: {}件", store.len()))?;
        }
        Ok(Acquisition {
            store,
            state,
            skipped,
        })
    }

    fn wants_download<P: Prompter + ?Sized>(&self, prompter: &mut P) -> Result<bool, CalendarError> {
        match self.consent {
            Consent::Always => Ok(true),
            Consent::Never => Ok(false),
            Consent::Ask => prompter.confirm("内閣府から祝日データをダウンロードしますか？ (y/n): "),
        }
    }

    /// Fetch, decode and cache the dataset, returning its UTF-8 text.
    fn download<P: Prompter + ?Sized>(&self, prompter: &mut P) -> Result<String, CalendarError> {
        let raw = self.fetcher.fetch()?;
        let text = normalize_for_storage(&raw, self.encoding)?;
        match self.cache.write(&text) {
            Ok(()) => {
                prompter.say(&format!(
                    "祝日データを保存しました: {}",
                    self.cache.describe()
                ))?;
            }
            Err(e) => {
                warn!(cache = %self.cache.describe(), error = %e, "cannot write cache");
                prompter.say(&format!("キャッシュ保存エラー: {e}"))?;
            }
        }
        Ok(text)
    }
}
