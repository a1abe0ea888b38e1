use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::time::Duration;
use tracing::debug;

use crate::config::AppConfig;
use crate::error::Error;
use crate::scanner;

/// Target format of a conversion run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    /// DNxHD for editing. Large files.
    Editing,
    /// MPEG-4 for viewing and sharing. Much smaller files.
    Sharing,
}

impl Profile {
    fn codec_args(&self) -> &'static [&'static str] {
        match self {
            Profile::Editing => &[
                "-c:v",
                "dnxhd",
                "-b:v",
                "145M",
                "-q:v",
                "1",
                "-c:a",
                "pcm_s16be",
            ],
            Profile::Sharing => &["-c:v", "mpeg4", "-q:v", "1", "-c:a", "aac"],
        }
    }

    pub fn dir_suffix(&self) -> &'static str {
        match self {
            Profile::Editing => "_c",
            Profile::Sharing => "_s",
        }
    }
}

/// One pending ffmpeg invocation.
#[derive(Debug, Clone)]
pub struct ConvertJob {
    pub input: PathBuf,
    pub output: PathBuf,
}

#[derive(Debug, Default)]
pub struct ConvertOutcome {
    pub converted: usize,
    pub skipped: usize,
    pub failed: usize,
    pub duration: Duration,
}

pub fn default_output_dir(source: &Path, profile: Profile) -> PathBuf {
    scanner::sibling_with_suffix(source, profile.dir_suffix())
}

/// Build the job list for a run, skipping files whose output already
/// exists. Returns the jobs plus the skipped count.
pub fn plan(
    raw_files: &[PathBuf],
    out_dir: &Path,
    converted_extension: &str,
) -> (Vec<ConvertJob>, usize) {
    let mut jobs = Vec::new();
    let mut skipped = 0;

    for input in raw_files {
        let base = match input.file_stem() {
            Some(stem) => stem,
            None => continue,
        };
        let output = out_dir
            .join(base)
            .with_extension(converted_extension);
        if output.exists() {
            debug!("'{}' already exists, skipping", output.display());
            skipped += 1;
            continue;
        }
        jobs.push(ConvertJob {
            input: input.clone(),
            output,
        });
    }

    (jobs, skipped)
}

/// Argument list for one invocation:
/// `ffmpeg -loglevel 24 -y -i <input> <codec args> [-vf yadif] -f mp4 <output>`.
pub fn ffmpeg_args(job: &ConvertJob, profile: Profile, deinterlace: bool) -> Vec<OsString> {
    let mut args: Vec<OsString> = vec![
        "-loglevel".into(),
        "24".into(),
        "-y".into(),
        "-i".into(),
        job.input.clone().into(),
    ];
    args.extend(profile.codec_args().iter().map(OsString::from));
    if deinterlace {
        args.push("-vf".into());
        args.push("yadif".into());
    }
    args.push("-f".into());
    args.push("mp4".into());
    args.push(job.output.clone().into());
    args
}

/// Run one blocking ffmpeg subprocess. The exit status is only inspected
/// for success, never parsed.
pub fn run_job(
    config: &AppConfig,
    job: &ConvertJob,
    profile: Profile,
    deinterlace: bool,
) -> Result<(), Error> {
    let status = Command::new(&config.ffmpeg_command)
        .args(ffmpeg_args(job, profile, deinterlace))
        .status()?;

    if !status.success() {
        return Err(Error::Subprocess {
            command: config.ffmpeg_command.clone(),
            status,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_job() -> ConvertJob {
        ConvertJob {
            input: PathBuf::from("/footage/00000.MTS"),
            output: PathBuf::from("/footage_s/00000.mp4"),
        }
    }

    #[test]
    fn test_ffmpeg_args_order() {
        let args = ffmpeg_args(&make_job(), Profile::Sharing, false);
        assert_eq!(args[0], OsString::from("-loglevel"));
        assert_eq!(args[3], OsString::from("-i"));
        assert_eq!(args[4], OsString::from("/footage/00000.MTS"));
        assert_eq!(args[args.len() - 1], OsString::from("/footage_s/00000.mp4"));
        assert!(args.contains(&OsString::from("mpeg4")));
        assert!(!args.contains(&OsString::from("yadif")));
    }

    #[test]
    fn test_deinterlace_adds_yadif_before_format() {
        let args = ffmpeg_args(&make_job(), Profile::Editing, true);
        let vf = args.iter().position(|a| a == "-vf").unwrap();
        assert_eq!(args[vf + 1], OsString::from("yadif"));
        assert!(args.contains(&OsString::from("dnxhd")));
    }

    #[test]
    fn test_default_output_dir_uses_profile_suffix() {
        let source = Path::new("/footage/shoot1");
        assert_eq!(
            default_output_dir(source, Profile::Editing),
            PathBuf::from("/footage/shoot1_c")
        );
        assert_eq!(
            default_output_dir(source, Profile::Sharing),
            PathBuf::from("/footage/shoot1_s")
        );
    }
}
