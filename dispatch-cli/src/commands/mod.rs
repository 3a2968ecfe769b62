use clap::ArgMatches;
use dispatch_core::prelude::{GenericError, GenericResult};
use std::fs::File;
use std::io::BufReader;
use std::str::FromStr;

pub mod assign;

fn open_file(path: &str, description: &str) -> GenericResult<BufReader<File>> {
    File::open(path)
        .map(BufReader::new)
        .map_err(|err| GenericError::with_context(format!("cannot open {description} file '{path}'"), err))
}

fn parse_value<T>(matches: &ArgMatches, arg_name: &str, arg_desc: &str) -> GenericResult<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    matches
        .get_one::<String>(arg_name)
        .map(|arg| arg.parse::<T>().map_err(|err| GenericError::from(format!("cannot parse {arg_desc} from '{arg}': '{err}'"))))
        .transpose()
}
