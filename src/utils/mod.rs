
/// Normalizes a vault path the way the host vault does: forward slashes
/// only, no empty or `.` segments, `..` resolved, no leading or trailing
/// separator. An empty result is the vault root, `/`.
pub fn normalize_path(path: &str) -> String {
    let unified = path.replace('\\', "/");
    let mut segments: Vec<&str> = Vec::new();

    for segment in unified.split('/') {
        match segment.trim() {
            "" | "." => {}
            ".." => {
                segments.pop();
            }
            _ => segments.push(segment),
        }
    }

    if segments.is_empty() {
        "/".to_string()
    } else {
        segments.join("/")
    }
}

/// Joins `name` onto `dir` and normalizes the result. The vault root (`/`)
/// contributes no prefix.
pub fn join_path(dir: &str, name: &str) -> String {
    normalize_path(&format!("{}/{}", dir, name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_path() {
        assert_eq!(normalize_path("Files/Reels"), "Files/Reels");
        assert_eq!(normalize_path("/Files//Reels/"), "Files/Reels");
        assert_eq!(normalize_path("Files\\Reels\\clip.mp4"), "Files/Reels/clip.mp4");
        assert_eq!(normalize_path("./Files/./Reels"), "Files/Reels");
        assert_eq!(normalize_path("Files/tmp/../Reels"), "Files/Reels");
        assert_eq!(normalize_path("../.."), "/");
        assert_eq!(normalize_path(""), "/");
        assert_eq!(normalize_path("/"), "/");
    }

    #[test]
    fn test_join_path() {
        assert_eq!(join_path("Files/Reels", "video_abc.mp4"), "Files/Reels/video_abc.mp4");
        assert_eq!(join_path("Files/Reels/", "video_abc.mp4"), "Files/Reels/video_abc.mp4");
        assert_eq!(join_path("/", "video_abc.mp4"), "video_abc.mp4");
        assert_eq!(join_path("", "video_abc.mp4"), "video_abc.mp4");
    }
}
