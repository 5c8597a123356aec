use anyhow::{bail, Context, Result};
use std::path::PathBuf;

use crate::lesson::Lesson;

pub const USAGE: &str = "usage: glprimer [LESSON] [--config PATH] [--list]";

/// `glprimer [LESSON] [--config PATH] [--list]`
#[derive(Debug, Default, PartialEq, Eq)]
pub struct CliArgs {
    pub lesson: Option<Lesson>,
    pub config: Option<PathBuf>,
    pub list: bool,
}

impl CliArgs {
    /// Parses arguments without the program name.
    pub fn parse<I, S>(args: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut parsed = CliArgs::default();
        let mut args = args.into_iter().map(Into::into);

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--config" | "-c" => {
                    let path = args.next().context("--config needs a path")?;
                    parsed.config = Some(PathBuf::from(path));
                }
                "--list" | "-l" => parsed.list = true,
                flag if flag.starts_with('-') => bail!("unknown flag '{flag}'\n{USAGE}"),
                name => {
                    if parsed.lesson.is_some() {
                        bail!("more than one lesson given\n{USAGE}");
                    }
                    parsed.lesson = Some(name.parse()?);
                }
            }
        }

        Ok(parsed)
    }
}
