//! Path-typing file picker restricted to one content type.
//!
//! The typed text is split into a directory and a name fragment; entries of
//! that directory are fuzzy-matched against the fragment. Only directories
//! and files accepted by the [`FileFilter`] are offered.

use base64::Engine as _;
use crossterm::event::KeyCode;
use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use onboard_core::{FileFilter, PickOutcome, PickedFile};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::input::InputBuffer;

const MAX_DISPLAY_ITEMS: usize = 8;

#[derive(Debug, Clone, PartialEq)]
pub struct FileEntry {
    pub name: String,
    pub path: PathBuf,
    pub is_dir: bool,
    pub match_indices: Vec<usize>,
}

pub struct FilePicker {
    filter: FileFilter,
    base_dir: PathBuf,
    input: InputBuffer,
    entries: Vec<FileEntry>,
    selected_index: usize,
    error: Option<String>,
    matcher: SkimMatcherV2,
}

impl std::fmt::Debug for FilePicker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FilePicker")
            .field("filter", &self.filter)
            .field("base_dir", &self.base_dir)
            .field("input", &self.input.content())
            .field("entries", &self.entries.len())
            .field("selected_index", &self.selected_index)
            .finish()
    }
}

impl FilePicker {
    /// Open the picker with relative paths resolved against `base_dir`
    pub fn new(filter: FileFilter, base_dir: impl Into<PathBuf>) -> Self {
        let mut picker = Self {
            filter,
            base_dir: base_dir.into(),
            input: InputBuffer::new(),
            entries: Vec::new(),
            selected_index: 0,
            error: None,
            matcher: SkimMatcherV2::default(),
        };
        picker.refresh();
        picker
    }

    pub fn filter(&self) -> FileFilter {
        self.filter
    }

    pub fn input(&self) -> &InputBuffer {
        &self.input
    }

    pub fn entries(&self) -> &[FileEntry] {
        &self.entries
    }

    pub fn selected_index(&self) -> usize {
        self.selected_index
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// `None` while the picker stays open
    pub fn handle_key(&mut self, key: KeyCode) -> Option<PickOutcome<PathBuf>> {
        match key {
            KeyCode::Esc => return Some(PickOutcome::Cancelled),
            KeyCode::Enter => return self.confirm(),
            KeyCode::Tab => self.complete_selected(),
            KeyCode::Up => self.move_up(),
            KeyCode::Down => self.move_down(),
            KeyCode::Left => {
                self.input.move_left();
            }
            KeyCode::Right => {
                self.input.move_right();
            }
            KeyCode::Backspace => {
                self.input.backspace();
                self.refresh();
            }
            KeyCode::Char(c) => {
                self.input.insert_char(c);
                self.refresh();
            }
            _ => {}
        }
        None
    }

    pub fn move_up(&mut self) {
        if self.entries.is_empty() {
            return;
        }
        self.selected_index = if self.selected_index == 0 {
            self.entries.len() - 1
        } else {
            self.selected_index - 1
        };
    }

    pub fn move_down(&mut self) {
        if self.entries.is_empty() {
            return;
        }
        self.selected_index = (self.selected_index + 1) % self.entries.len();
    }

    /// Replace the typed text with the selected entry
    pub fn complete_selected(&mut self) {
        if let Some(entry) = self.entries.get(self.selected_index).cloned() {
            let mut text = entry.path.to_string_lossy().into_owned();
            if entry.is_dir {
                text.push(std::path::MAIN_SEPARATOR);
            }
            self.input.set_content(text);
            self.refresh();
        }
    }

    fn confirm(&mut self) -> Option<PickOutcome<PathBuf>> {
        let typed = self.resolve(self.input.content());
        if typed.is_file() && self.filter.matches(&typed) {
            return Some(PickOutcome::Picked(typed));
        }

        match self.entries.get(self.selected_index).cloned() {
            Some(entry) if entry.is_dir => {
                self.complete_selected();
                None
            }
            Some(entry) => Some(PickOutcome::Picked(entry.path)),
            None => {
                self.error = Some(format!(
                    "No {} file matches",
                    self.filter.extensions().join("/")
                ));
                None
            }
        }
    }

    fn resolve(&self, typed: &str) -> PathBuf {
        let expanded = match typed.strip_prefix("~/") {
            Some(rest) => dirs::home_dir()
                .map(|home| home.join(rest))
                .unwrap_or_else(|| PathBuf::from(typed)),
            None => PathBuf::from(typed),
        };
        if expanded.is_absolute() {
            expanded
        } else {
            self.base_dir.join(expanded)
        }
    }

    /// Directory to list and the name fragment to match within it
    fn split_typed(&self) -> (PathBuf, String) {
        let typed = self.input.content();
        if typed.is_empty() {
            return (self.base_dir.clone(), String::new());
        }
        let resolved = self.resolve(typed);
        if typed.ends_with('/') || typed.ends_with(std::path::MAIN_SEPARATOR) {
            return (resolved, String::new());
        }
        let fragment = resolved
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default();
        let dir = resolved
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| self.base_dir.clone());
        (dir, fragment)
    }

    fn refresh(&mut self) {
        self.error = None;
        self.selected_index = 0;
        let (dir, fragment) = self.split_typed();

        let read = match std::fs::read_dir(&dir) {
            Ok(read) => read,
            Err(e) => {
                debug!("Cannot list {}: {}", dir.display(), e);
                self.entries.clear();
                return;
            }
        };

        let mut scored: Vec<(i64, FileEntry)> = Vec::new();
        for entry in read.flatten() {
            let path = entry.path();
            let name = entry.file_name().to_string_lossy().into_owned();
            if name.starts_with('.') && !fragment.starts_with('.') {
                continue;
            }
            let is_dir = path.is_dir();
            if !is_dir && !self.filter.matches(&path) {
                continue;
            }

            let (score, match_indices) = if fragment.is_empty() {
                (0, Vec::new())
            } else {
                match self.matcher.fuzzy_indices(&name, &fragment) {
                    Some(found) => found,
                    None => continue,
                }
            };

            scored.push((
                score,
                FileEntry {
                    name,
                    path,
                    is_dir,
                    match_indices,
                },
            ));
        }

        scored.sort_by(|(sa, a), (sb, b)| {
            sb.cmp(sa)
                .then_with(|| b.is_dir.cmp(&a.is_dir))
                .then_with(|| a.name.cmp(&b.name))
        });
        self.entries = scored
            .into_iter()
            .take(MAX_DISPLAY_ITEMS)
            .map(|(_, entry)| entry)
            .collect();
    }
}

/// Read a chosen file into the shape the flow expects.
///
/// Images carry their base64 content; documents only their location.
pub async fn load_picked_file(path: &Path, filter: FileFilter) -> PickOutcome<PickedFile> {
    let absolute = match tokio::fs::canonicalize(path).await {
        Ok(absolute) => absolute,
        Err(e) => {
            warn!("Failed to resolve {}: {}", path.display(), e);
            return PickOutcome::Failed(e.to_string());
        }
    };

    let uri = format!("file://{}", absolute.to_string_lossy());
    let mut file = PickedFile::new(uri);
    if let Some(name) = absolute.file_name() {
        file = file.with_name(name.to_string_lossy());
    }

    if filter == FileFilter::Images {
        match tokio::fs::read(&absolute).await {
            Ok(bytes) => {
                file = file.with_content(base64::engine::general_purpose::STANDARD.encode(bytes));
            }
            Err(e) => {
                warn!("Failed to read {}: {}", absolute.display(), e);
                return PickOutcome::Failed(e.to_string());
            }
        }
    }

    PickOutcome::Picked(file)
}
