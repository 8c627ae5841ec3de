/// Package URIs: absolute part names inside an OPC package.
///
/// Part names always begin with a forward slash. The zip member a part is
/// stored under is the part name without that slash.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PackURI {
    /// The full pack URI string (e.g., "/xl/workbook.xml")
    uri: String,
}

impl PackURI {
    /// Create a new PackURI from a string that begins with a slash.
    pub fn new<S: Into<String>>(uri: S) -> Result<Self, String> {
        let uri = uri.into();
        if !uri.starts_with('/') {
            return Err(format!("PackURI must begin with slash, got '{}'", uri));
        }
        Ok(PackURI { uri })
    }

    /// Resolve a relationship target against the directory of its source.
    ///
    /// `"worksheets/sheet1.xml"` against `"/xl"` gives `"/xl/worksheets/sheet1.xml"`.
    /// A target that already starts with a slash is taken as package-absolute.
    pub fn from_rel_ref(base_uri: &str, relative_ref: &str) -> Result<Self, String> {
        let joined = if relative_ref.starts_with('/') {
            relative_ref.to_string()
        } else if base_uri.ends_with('/') {
            format!("{}{}", base_uri, relative_ref)
        } else {
            format!("{}/{}", base_uri, relative_ref)
        };
        Self::new(Self::normalize_path(&joined))
    }

    /// Directory portion of this PackURI; `"/"` for top-level parts.
    pub fn base_uri(&self) -> &str {
        match self.uri.rfind('/') {
            Some(0) | None => "/",
            Some(pos) => &self.uri[..pos],
        }
    }

    /// Filename portion; empty for the package pseudo-partname `"/"`.
    pub fn filename(&self) -> &str {
        self.uri
            .rfind('/')
            .map(|pos| &self.uri[pos + 1..])
            .unwrap_or("")
    }

    /// Zip member name (URI with the leading slash stripped).
    pub fn membername(&self) -> &str {
        &self.uri[1..]
    }

    /// PackURI of the `.rels` part holding this part's relationships.
    ///
    /// `"/xl/_rels/workbook.xml.rels"` for `"/xl/workbook.xml"`, and
    /// `"/_rels/.rels"` for the package itself.
    pub fn rels_uri(&self) -> Result<PackURI, String> {
        let base_uri = self.base_uri();
        let rels_filename = format!("{}.rels", self.filename());
        if base_uri == "/" {
            Self::new(format!("/_rels/{}", rels_filename))
        } else {
            Self::new(format!("{}/_rels/{}", base_uri, rels_filename))
        }
    }

    /// Get the full URI string.
    pub fn as_str(&self) -> &str {
        &self.uri
    }

    /// Resolve `.` and `..` segments; `..` never climbs above the root.
    fn normalize_path(path: &str) -> String {
        let mut parts: Vec<&str> = Vec::new();

        for part in path.split('/') {
            match part {
                "" | "." => {},
                ".." => {
                    parts.pop();
                },
                _ => parts.push(part),
            }
        }

        format!("/{}", parts.join("/"))
    }
}

impl std::fmt::Display for PackURI {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.uri)
    }
}

impl AsRef<str> for PackURI {
    fn as_ref(&self) -> &str {
        &self.uri
    }
}

/// The package pseudo-partname, representing the package itself
pub const PACKAGE_URI: &str = "/";

/// The URI for the [Content_Types].xml part
pub const CONTENT_TYPES_URI: &str = "/[Content_Types].xml";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_packuri_new() {
        assert!(PackURI::new("/xl/workbook.xml").is_ok());
        assert!(PackURI::new("xl/workbook.xml").is_err());
    }

    #[test]
    fn test_base_uri() {
        let uri = PackURI::new("/xl/worksheets/sheet1.xml").unwrap();
        assert_eq!(uri.base_uri(), "/xl/worksheets");

        let root = PackURI::new(PACKAGE_URI).unwrap();
        assert_eq!(root.base_uri(), "/");
    }

    #[test]
    fn test_from_rel_ref() {
        let uri = PackURI::from_rel_ref("/xl", "worksheets/sheet1.xml").unwrap();
        assert_eq!(uri.as_str(), "/xl/worksheets/sheet1.xml");

        let uri = PackURI::from_rel_ref("/xl/worksheets", "../styles.xml").unwrap();
        assert_eq!(uri.as_str(), "/xl/styles.xml");

        let uri = PackURI::from_rel_ref("/xl", "/xl/worksheets/sheet2.xml").unwrap();
        assert_eq!(uri.as_str(), "/xl/worksheets/sheet2.xml");

        let uri = PackURI::from_rel_ref("/", "xl/workbook.xml").unwrap();
        assert_eq!(uri.as_str(), "/xl/workbook.xml");

        let uri = PackURI::from_rel_ref("/", "../../../etc/passwd").unwrap();
        assert_eq!(uri.as_str(), "/etc/passwd");
    }

    #[test]
    fn test_rels_uri() {
        let pkg = PackURI::new(PACKAGE_URI).unwrap();
        assert_eq!(pkg.rels_uri().unwrap().as_str(), "/_rels/.rels");

        let wb = PackURI::new("/xl/workbook.xml").unwrap();
        assert_eq!(wb.rels_uri().unwrap().membername(), "xl/_rels/workbook.xml.rels");
    }
}
