//! Local blog content: Markdown files with TOML front matter.
//!
//! Only metadata is read here; rendering post bodies is the job of the
//! site's rendering layer. Front matter is validated on load so listing
//! code downstream only ever sees typed dates.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tokio::fs;
use tracing::debug;

use crate::domain::entities::BlogMetadata;
use crate::util::date;

use super::error::InfraError;

const FRONT_MATTER_FENCE: &str = "+++";
const MARKDOWN_EXTENSION: &str = "md";

#[derive(Debug, Clone)]
pub struct ContentStore {
    root: PathBuf,
}

impl ContentStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Load metadata for every published post under the content root.
    ///
    /// Results are ordered by slug so the output is deterministic across
    /// filesystems; callers sort by date for display.
    pub async fn blog_metadata(&self) -> Result<Vec<BlogMetadata>, InfraError> {
        let mut entries = fs::read_dir(&self.root).await.map_err(|err| {
            InfraError::content(format!(
                "failed to read content directory `{}`: {err}",
                self.root.display()
            ))
        })?;

        let mut blogs = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(MARKDOWN_EXTENSION) {
                continue;
            }
            let source = fs::read_to_string(&path).await?;
            if let Some(metadata) = parse_post(&path, &source)? {
                blogs.push(metadata);
            }
        }

        blogs.sort_by(|a, b| a.slug.cmp(&b.slug));
        debug!(count = blogs.len(), root = %self.root.display(), "loaded blog metadata");
        Ok(blogs)
    }
}

#[derive(Debug, Deserialize)]
struct FrontMatter {
    title: String,
    date: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default = "default_published")]
    published: bool,
}

fn default_published() -> bool {
    true
}

fn parse_post(path: &Path, source: &str) -> Result<Option<BlogMetadata>, InfraError> {
    let raw = extract_front_matter(source).ok_or_else(|| {
        InfraError::content(format!("`{}` has no front matter block", path.display()))
    })?;
    let front: FrontMatter = toml::from_str(raw).map_err(|err| {
        InfraError::content(format!("invalid front matter in `{}`: {err}", path.display()))
    })?;

    if !front.published {
        return Ok(None);
    }

    let parsed = date::parse_raw(&front.date).ok_or_else(|| {
        InfraError::content(format!(
            "invalid date `{}` in `{}`",
            front.date,
            path.display()
        ))
    })?;

    let stem = path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .ok_or_else(|| {
            InfraError::content(format!("`{}` has no usable file name", path.display()))
        })?;

    Ok(Some(BlogMetadata {
        slug: slug::slugify(stem),
        title: front.title,
        description: front.description,
        date: parsed,
    }))
}

fn extract_front_matter(source: &str) -> Option<&str> {
    let rest = source.strip_prefix(FRONT_MATTER_FENCE)?;
    let rest = rest
        .strip_prefix('\n')
        .or_else(|| rest.strip_prefix("\r\n"))?;

    // The closing fence must be exactly `+++` on its own line; lines that
    // merely start with the fence belong to the payload.
    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end_matches(['\r', '\n']) == FRONT_MATTER_FENCE {
            return Some(&rest[..offset]);
        }
        offset += line.len();
    }
    None
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use super::*;

    const POST: &str = "+++\n\
        title = \"Testing in Rust\"\n\
        date = \"2022-07-07\"\n\
        description = \"Notes on testing\"\n\
        +++\n\
        \n\
        Body text.\n";

    #[test]
    fn extracts_the_front_matter_block() {
        let raw = extract_front_matter(POST).expect("front matter present");
        assert!(raw.contains("title = \"Testing in Rust\""));
        assert!(!raw.contains("Body text"));
    }

    #[test]
    fn missing_fence_is_detected() {
        assert!(extract_front_matter("just a paragraph").is_none());
        assert!(extract_front_matter("+++\ntitle = \"x\"\n").is_none());
    }

    #[test]
    fn parses_metadata_with_a_slugified_file_stem() {
        let metadata = parse_post(Path::new("content/Testing In Rust.md"), POST)
            .expect("valid post")
            .expect("published post");

        assert_eq!(metadata.slug, "testing-in-rust");
        assert_eq!(metadata.title, "Testing in Rust");
        assert_eq!(metadata.description.as_deref(), Some("Notes on testing"));
        assert_eq!(metadata.date, date!(2022 - 07 - 07));
    }

    #[test]
    fn crlf_authored_posts_parse() {
        let source = "+++\r\n\
            title = \"Windows Post\"\r\n\
            date = \"2022-07-07\"\r\n\
            +++\r\n\
            \r\n\
            Body.\r\n";

        let metadata = parse_post(Path::new("windows-post.md"), source)
            .expect("valid post")
            .expect("published post");

        assert_eq!(metadata.title, "Windows Post");
        assert_eq!(metadata.date, date!(2022 - 07 - 07));
    }

    #[test]
    fn fence_must_be_an_exact_line() {
        let source = "+++\n\
            title = \"x\"\n\
            ++++\n\
            date = \"2022-01-01\"\n\
            +++\n\
            Body.\n";

        let raw = extract_front_matter(source).expect("front matter present");
        assert!(raw.contains("++++"));
        assert!(raw.contains("date = \"2022-01-01\""));
        assert!(!raw.contains("Body"));
    }

    #[test]
    fn closing_fence_at_end_of_file_is_accepted() {
        let source = "+++\ntitle = \"x\"\ndate = \"2022-01-01\"\n+++";
        let raw = extract_front_matter(source).expect("front matter present");
        assert!(raw.ends_with("date = \"2022-01-01\"\n"));
    }

    #[test]
    fn unpublished_posts_are_skipped() {
        let source = "+++\n\
            title = \"Draft\"\n\
            date = \"2022-07-07\"\n\
            published = false\n\
            +++\n\
            Body.\n";

        let metadata = parse_post(Path::new("draft.md"), source).expect("valid post");
        assert!(metadata.is_none());
    }

    #[test]
    fn invalid_date_names_the_offending_file() {
        let source = "+++\n\
            title = \"Bad\"\n\
            date = \"next tuesday\"\n\
            +++\n\
            Body.\n";

        let err = parse_post(Path::new("bad-date.md"), source).expect_err("invalid date rejected");
        let message = err.to_string();
        assert!(message.contains("next tuesday"));
        assert!(message.contains("bad-date.md"));
    }

    #[test]
    fn malformed_toml_is_rejected() {
        let source = "+++\n\
            title = unquoted\n\
            +++\n";

        let err = parse_post(Path::new("broken.md"), source).expect_err("broken front matter");
        assert!(err.to_string().contains("invalid front matter"));
    }
}
