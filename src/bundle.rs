//! Docset bundle layout.
//!
//! A bundle is a directory tree the offline browser consumes directly:
//!
//! ```text
//! {package}.docset/
//!   icon.png                      (optional)
//!   Contents/
//!     Info.plist
//!     Resources/
//!       docSet.dsidx
//!       Documents/                (mirrors the source tree)
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::error::Result;

/// Handle to a created bundle directory.
pub struct Bundle {
    root: PathBuf,
}

impl Bundle {
    /// Create the bundle skeleton under `parent`.
    pub fn create(parent: &Path, package: &str) -> Result<Self> {
        let root = parent.join(format!("{package}.docset"));
        fs::create_dir_all(root.join("Contents/Resources/Documents"))?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Directory name of the bundle, for traversal exclusion.
    pub fn dir_name(package: &str) -> String {
        format!("{package}.docset")
    }

    pub fn documents_dir(&self) -> PathBuf {
        self.root.join("Contents/Resources/Documents")
    }

    pub fn search_index_path(&self) -> PathBuf {
        self.root.join("Contents/Resources/docSet.dsidx")
    }

    /// Write a processed document, creating parent directories as needed.
    /// An existing file is overwritten, never merged.
    pub fn write_document(&self, relative: &str, contents: &str) -> Result<()> {
        let dest = self.documents_dir().join(relative);
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(dest, contents)?;
        Ok(())
    }

    /// Copy a non-HTML file into the documents tree byte-for-byte.
    pub fn copy_verbatim(&self, relative: &str, source: &Path) -> Result<()> {
        let dest = self.documents_dir().join(relative);
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::copy(source, dest)?;
        Ok(())
    }

    /// Emit `Contents/Info.plist` from the configuration.
    pub fn write_plist(&self, config: &Config) -> Result<()> {
        let allow_js = if config.allow_js { "true" } else { "false" };
        let plist = format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<!DOCTYPE plist PUBLIC "-//Apple//DTD PLIST 1.0//EN" "http://www.apple.com/DTDs/PropertyList-1.0.dtd">
<plist version="1.0">
<dict>
	<key>CFBundleIdentifier</key>
	<string>{package}</string>
	<key>CFBundleName</key>
	<string>{name}</string>
	<key>DocSetPlatformFamily</key>
	<string>{package}</string>
	<key>isDashDocset</key>
	<true/>
	<key>DashDocSetFamily</key>
	<string>dashtoc</string>
	<key>dashIndexFilePath</key>
	<string>{index}</string>
	<key>isJavaScriptEnabled</key><{allow_js}/>
</dict>
</plist>
"#,
            package = escape_xml(&config.package),
            name = escape_xml(&config.fancy_name()),
            index = escape_xml(&config.index),
        );
        fs::write(self.root.join("Contents/Info.plist"), plist)?;
        Ok(())
    }

    /// Install the configured 32x32 icon at the bundle root.
    pub fn install_icon(&self, source: &Path) -> Result<()> {
        fs::copy(source, self.root.join("icon.png"))?;
        Ok(())
    }
}

fn escape_xml(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(json: &str) -> Config {
        Config::from_json(json).unwrap()
    }

    #[test]
    fn creates_the_expected_skeleton() {
        let dir = tempfile::tempdir().unwrap();
        let bundle = Bundle::create(dir.path(), "demo").unwrap();

        assert!(bundle.documents_dir().is_dir());
        assert_eq!(
            bundle.root(),
            dir.path().join("demo.docset").as_path()
        );
    }

    #[test]
    fn plist_carries_package_metadata() {
        let dir = tempfile::tempdir().unwrap();
        let bundle = Bundle::create(dir.path(), "demo").unwrap();
        bundle
            .write_plist(&config(
                r#"{"package": "demo", "name": "Demo & Docs", "index": "index.html", "allowJS": true}"#,
            ))
            .unwrap();

        let plist = fs::read_to_string(bundle.root().join("Contents/Info.plist")).unwrap();
        assert!(plist.contains("<string>demo</string>"));
        assert!(plist.contains("<string>Demo &amp; Docs</string>"));
        assert!(plist.contains("<string>index.html</string>"));
        assert!(plist.contains("<key>isJavaScriptEnabled</key><true/>"));
        assert!(plist.contains("<string>dashtoc</string>"));
    }

    #[test]
    fn write_document_creates_parents_and_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let bundle = Bundle::create(dir.path(), "demo").unwrap();

        bundle.write_document("a/b/page.html", "<p>one</p>").unwrap();
        bundle.write_document("a/b/page.html", "<p>two</p>").unwrap();

        let written =
            fs::read_to_string(bundle.documents_dir().join("a/b/page.html")).unwrap();
        assert_eq!(written, "<p>two</p>");
    }
}
