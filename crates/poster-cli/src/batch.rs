//! Folder enumeration and batch splitting for multi-poster runs

use anyhow::{Context, Result, bail, ensure};
use poster_core::constants::MIN_IMAGES;
use std::cmp::Ordering;
use std::iter::Peekable;
use std::path::{Path, PathBuf};
use std::str::Chars;

/// File extensions picked up from an input folder (compared case-insensitively)
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp", "bmp"];

/// Images for one poster
#[derive(Debug, Clone, PartialEq)]
pub struct Batch {
    /// 1-based position in the run
    pub index: usize,
    pub inputs: Vec<PathBuf>,
}

impl Batch {
    pub fn count(&self) -> usize {
        self.inputs.len()
    }

    /// `template_{count}_{date}_{index}.png`
    pub fn file_name(&self, date: &str) -> String {
        format!("template_{}_{}_{}.png", self.count(), date, self.index)
    }
}

/// List the images directly inside `dir` (no recursion), in natural order
pub fn collect_images(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries =
        std::fs::read_dir(dir).with_context(|| format!("Failed to read {}", dir.display()))?;

    let mut images = Vec::new();
    for entry in entries {
        let path = entry?.path();
        if path.is_file() && has_image_extension(&path) {
            images.push(path);
        }
    }

    images.sort_by(|a, b| natural_cmp(&file_name(a), &file_name(b)));
    Ok(images)
}

fn has_image_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
        .is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext.as_str()))
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Slice `images` into consecutive batches of the requested sizes.
///
/// Every count must be at least [`MIN_IMAGES`] and the counts together may
/// not ask for more images than there are. Leftover images are ignored.
pub fn split_batches(images: &[PathBuf], counts: &[usize]) -> Result<Vec<Batch>> {
    if counts.is_empty() {
        bail!("No poster sizes given");
    }
    if let Some(&count) = counts.iter().find(|&&count| count < MIN_IMAGES) {
        bail!("Each poster needs at least {MIN_IMAGES} images (got {count})");
    }

    let needed: usize = counts.iter().sum();
    ensure!(
        needed <= images.len(),
        "Not enough images: need {needed}, found {}",
        images.len()
    );

    let mut start = 0;
    let batches = counts
        .iter()
        .enumerate()
        .map(|(i, &count)| {
            let batch = Batch {
                index: i + 1,
                inputs: images[start..start + count].to_vec(),
            };
            start += count;
            batch
        })
        .collect();
    Ok(batches)
}

/// Compare file names so that embedded numbers sort by value
/// (`img2` before `img10`), letters case-insensitively.
///
/// Numbers that differ only in leading zeros (`1` and `01`) tie until the
/// rest of the names are compared; the shorter run then sorts first.
pub fn natural_cmp(a: &str, b: &str) -> Ordering {
    let mut left = a.chars().peekable();
    let mut right = b.chars().peekable();
    let mut zero_padding = Ordering::Equal;

    loop {
        let ordering = match (left.peek().copied(), right.peek().copied()) {
            (None, None) => return zero_padding.then_with(|| a.cmp(b)),
            (None, Some(_)) => return Ordering::Less,
            (Some(_), None) => return Ordering::Greater,
            (Some(x), Some(y)) if x.is_ascii_digit() && y.is_ascii_digit() => {
                let (left_run, right_run) = (take_digits(&mut left), take_digits(&mut right));
                zero_padding = zero_padding.then(left_run.len().cmp(&right_run.len()));
                compare_digit_values(&left_run, &right_run)
            }
            (Some(x), Some(y)) => {
                left.next();
                right.next();
                x.to_lowercase().cmp(y.to_lowercase())
            }
        };

        if ordering != Ordering::Equal {
            return ordering;
        }
    }
}

fn take_digits(chars: &mut Peekable<Chars<'_>>) -> String {
    let mut run = String::new();
    while let Some(digit) = chars.next_if(char::is_ascii_digit) {
        run.push(digit);
    }
    run
}

fn compare_digit_values(a: &str, b: &str) -> Ordering {
    let a_value = a.trim_start_matches('0');
    let b_value = b.trim_start_matches('0');
    a_value
        .len()
        .cmp(&b_value.len())
        .then_with(|| a_value.cmp(b_value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn paths(count: usize) -> Vec<PathBuf> {
        (0..count).map(|i| PathBuf::from(format!("{i}.png"))).collect()
    }

    #[test]
    fn test_natural_order() {
        let mut names = vec!["img10.png", "img2.png", "IMG1.png", "img02.png", "a.png"];
        names.sort_by(|a, b| natural_cmp(a, b));
        assert_eq!(
            names,
            vec!["a.png", "IMG1.png", "img2.png", "img02.png", "img10.png"]
        );
    }

    #[test]
    fn test_natural_order_prefix_first() {
        assert_eq!(natural_cmp("photo", "photo1"), Ordering::Less);
        assert_eq!(natural_cmp("b", "A"), Ordering::Greater);
        assert_eq!(natural_cmp("x9y", "x10a"), Ordering::Less);
    }

    #[test]
    fn test_zero_padding_only_breaks_ties() {
        assert_eq!(natural_cmp("a01b", "a1c"), Ordering::Less);
        assert_eq!(natural_cmp("a1c", "a01b"), Ordering::Greater);
        assert_eq!(natural_cmp("a1b", "a01b"), Ordering::Less);
        assert_eq!(natural_cmp("a01b", "a01b"), Ordering::Equal);
    }

    #[test]
    fn test_split_batches() {
        let images = paths(17);
        let batches = split_batches(&images, &[5, 5, 6]).unwrap();

        assert_eq!(batches.len(), 3);
        assert_eq!(batches[0].inputs, images[0..5]);
        assert_eq!(batches[1].inputs, images[5..10]);
        assert_eq!(batches[2].inputs, images[10..16]);
        assert_eq!(batches[2].index, 3);
    }

    #[test]
    fn test_split_rejects_small_count() {
        let err = split_batches(&paths(20), &[5, 4]).unwrap_err();
        assert!(err.to_string().contains("at least 5"));
    }

    #[test]
    fn test_split_rejects_shortage() {
        let err = split_batches(&paths(10), &[5, 6]).unwrap_err();
        assert!(err.to_string().contains("need 11, found 10"));
    }

    #[test]
    fn test_split_rejects_empty_counts() {
        assert!(split_batches(&paths(10), &[]).is_err());
    }

    #[test]
    fn test_file_name() {
        let batch = Batch {
            index: 2,
            inputs: paths(6),
        };
        assert_eq!(batch.file_name("20261015"), "template_6_20261015_2.png");
    }

    #[test]
    fn test_collect_images_filters_and_sorts() {
        let dir = TempDir::new().unwrap();
        for name in ["b10.JPG", "b2.png", "b1.webp", "notes.txt", "b3.bmp"] {
            std::fs::write(dir.path().join(name), b"").unwrap();
        }
        std::fs::create_dir(dir.path().join("nested.png")).unwrap();

        let names: Vec<String> = collect_images(dir.path())
            .unwrap()
            .iter()
            .map(|path| file_name(path))
            .collect();

        assert_eq!(names, vec!["b1.webp", "b2.png", "b3.bmp", "b10.JPG"]);
    }
}
