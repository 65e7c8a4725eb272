use std::fmt;
use std::path::{Path, PathBuf};

pub const UPLOAD_PATH: &str = "/upload";
pub const RESULT_PAGE: &str = "result.html";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub path: PathBuf,
    pub name: String,
}

impl SelectedFile {
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();
        Self { path, name }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Files returned by the picker, in picker order. Only the first one is ever
/// uploaded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileSelection {
    files: Vec<SelectedFile>,
}

impl FileSelection {
    pub fn new(files: Vec<SelectedFile>) -> Self {
        Self { files }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn single(path: impl Into<PathBuf>) -> Self {
        Self::new(vec![SelectedFile::from_path(path)])
    }

    pub fn first(&self) -> Option<&SelectedFile> {
        self.files.first()
    }

    pub fn clear(&mut self) {
        self.files.clear();
    }
}

/// A completed HTTP exchange. The status code is kept for logging only.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadResult {
    Success { chip: String, gerber: String },
    Failure { reason: Option<String> },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum QueryEncoding {
    /// Values are interpolated byte for byte.
    #[default]
    Verbatim,
    Percent,
}

impl QueryEncoding {
    fn apply(self, value: &str) -> String {
        match self {
            QueryEncoding::Verbatim => value.to_string(),
            QueryEncoding::Percent => urlencoding::encode(value).into_owned(),
        }
    }
}

/// Relative URL of the results page for one finished submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationTarget {
    url: String,
    success: bool,
}

impl NavigationTarget {
    pub fn for_result(result: &UploadResult, encoding: QueryEncoding) -> Self {
        match result {
            UploadResult::Success { chip, gerber } => Self {
                url: format!(
                    "{}?status=success&chip={}&gerber={}",
                    RESULT_PAGE,
                    encoding.apply(chip),
                    encoding.apply(gerber)
                ),
                success: true,
            },
            UploadResult::Failure { .. } => Self {
                url: format!("{}?status=fail", RESULT_PAGE),
                success: false,
            },
        }
    }

    pub fn as_str(&self) -> &str {
        &self.url
    }

    pub fn is_success(&self) -> bool {
        self.success
    }
}

impl fmt::Display for NavigationTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Aborted,
    NavigatedSuccess(NavigationTarget),
    NavigatedFail(NavigationTarget),
    Failed(String),
}
