use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Edge length of the square canvas, in pixels.
    pub size: u32,
    pub output_dir: PathBuf,
    pub file_name: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            size: 256,
            output_dir: PathBuf::from("icons"),
            file_name: "icon.png".to_string(),
        }
    }
}

impl Config {
    pub fn output_path(&self) -> PathBuf {
        self.output_dir.join(&self.file_name)
    }

    /// `output_path` joined with `/` on every platform, for user-facing
    /// messages.
    pub fn display_path(&self) -> String {
        let dir = self.output_dir.to_string_lossy().replace('\\', "/");
        format!("{}/{}", dir.trim_end_matches('/'), self.file_name)
    }
}
