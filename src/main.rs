use anyhow::Result;
use log::{error, info};
use simple_logger::SimpleLogger;

use glprimer::{cli::CliArgs, AppConfig, Lesson};

fn main() -> Result<()> {
    let args = CliArgs::parse(std::env::args().skip(1))?;

    if args.list {
        for lesson in Lesson::ALL {
            println!("{lesson}");
        }
        return Ok(());
    }

    let config = AppConfig::load_or_default(args.config.as_deref())?;
    SimpleLogger::new().with_level(config.level_filter()).init()?;

    let lesson = args.lesson.unwrap_or(config.render.lesson);
    info!("Starting glprimer, lesson '{}'", lesson);

    if let Err(err) = glprimer::run(lesson, config) {
        error!("Error occurred, exiting main program: {err:#}");
        return Err(err);
    }

    Ok(())
}
