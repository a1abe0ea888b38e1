use config::{Config, ConfigError, File as ConfigFile};
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Extension of the camera-native recordings (matched case-insensitively).
    pub raw_extension: String,
    /// Extension the converter writes and the reviewer pairs against.
    pub converted_extension: String,
    pub ffmpeg_command: String,
    pub player_command: String,
    pub player_args: Vec<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            raw_extension: "MTS".to_string(),
            converted_extension: "mp4".to_string(),
            ffmpeg_command: "ffmpeg".to_string(),
            player_command: "cvlc".to_string(),
            player_args: vec!["--play-and-exit".to_string()],
        }
    }
}

pub fn load_configuration() -> Result<AppConfig, ConfigError> {
    let builder = Config::builder()
        .add_source(ConfigFile::with_name("Footage").required(false))
        .build()?;
    builder.try_deserialize::<AppConfig>()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_cover_every_field() {
        let config = AppConfig::default();
        assert_eq!(config.raw_extension, "MTS");
        assert_eq!(config.converted_extension, "mp4");
        assert_eq!(config.ffmpeg_command, "ffmpeg");
        assert_eq!(config.player_command, "cvlc");
        assert_eq!(config.player_args, vec!["--play-and-exit".to_string()]);
    }
}
