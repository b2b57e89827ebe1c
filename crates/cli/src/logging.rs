//! Logger setup. Logs go to stderr so stdout stays machine readable.

use log::LevelFilter;

pub(crate) fn level_for(verbose: bool) -> LevelFilter {
    if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    }
}

pub fn init_logger(verbose: bool) -> Result<(), log::SetLoggerError> {
    fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "{:<5} [{}] {}",
                record.level(),
                record.target(),
                message
            ))
        })
        .level(level_for(verbose))
        .chain(std::io::stderr())
        .apply()
}
