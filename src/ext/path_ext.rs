use std::path::{Component, Path, PathBuf};

/// Separator used for relative paths regardless of the host platform
pub const CANONICAL_SEPARATOR: char = '/';

/// Absolute rendering of `path` for error messages.
///
/// Existing paths are canonicalized. Paths that cannot be resolved are made
/// absolute against the working directory and cleaned of `.` and `..`
/// without touching the filesystem.
pub fn best_effort_path_display(path: &Path) -> String {
    path.canonicalize()
        .or_else(|_| std::path::absolute(path).map(|absolute| lexically_normalized(&absolute)))
        .unwrap_or_else(|_| lexically_normalized(path))
        .display()
        .to_string()
}

fn lexically_normalized(path: &Path) -> PathBuf {
    path.components().fold(PathBuf::new(), |mut normalized, component| {
        match component {
            Component::CurDir => {}
            // `pop` leaves a bare root in place
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other),
        }
        normalized
    })
}

/// Joins the normal components of `path` with [`CANONICAL_SEPARATOR`].
/// Prefixes, roots and `.` are dropped, non UTF-8 names are converted lossily.
pub fn to_slash_string(path: &Path) -> String {
    let mut result = String::new();

    for component in path.components() {
        if let Component::Normal(name) = component {
            if !result.is_empty() {
                result.push(CANONICAL_SEPARATOR);
            }
            result.push_str(&name.to_string_lossy());
        }
    }

    result
}

pub trait BestEffortPathExt {
    fn best_effort_path_display(&self) -> String;
}

impl BestEffortPathExt for Path {
    fn best_effort_path_display(&self) -> String {
        best_effort_path_display(self)
    }
}

impl BestEffortPathExt for PathBuf {
    fn best_effort_path_display(&self) -> String {
        best_effort_path_display(self)
    }
}

pub trait SlashPathExt {
    fn to_slash_string(&self) -> String;
}

impl SlashPathExt for Path {
    fn to_slash_string(&self) -> String {
        to_slash_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("a.txt", "a.txt")]
    #[case("nested/dir/file.rs", "nested/dir/file.rs")]
    #[case("./nested/file", "nested/file")]
    #[case("", "")]
    fn slash_string_joins_normal_components(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(Path::new(input).to_slash_string(), expected);
    }

    #[test]
    fn slash_string_is_built_from_components_not_raw_text() {
        let path: PathBuf = ["top", "middle", "leaf.bin"].iter().collect();
        assert_eq!(path.to_slash_string(), "top/middle/leaf.bin");
    }

    #[test]
    fn lexical_normalization_resolves_parent_components() {
        let normalized = lexically_normalized(Path::new("/root/one/../two/./three"));
        assert_eq!(normalized, PathBuf::from("/root/two/three"));
    }

    #[test]
    fn lexical_normalization_does_not_pop_past_root() {
        let normalized = lexically_normalized(Path::new("/../../etc"));
        assert_eq!(normalized, PathBuf::from("/etc"));
    }

    #[test]
    fn best_effort_display_of_missing_path_is_absolute() {
        let display = Path::new("surely/not/here/../file").best_effort_path_display();
        assert!(Path::new(&display).is_absolute());
        assert!(display.ends_with("surely/not/file"));
    }
}
