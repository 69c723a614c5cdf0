//! Runs `linkedin_crawler` with the same arguments and prints only its JSON.

use std::ffi::OsString;

use linkedin_crawler::wrapper::{crawler_path, run_isolated};

fn main() {
    let args: Vec<OsString> = std::env::args_os().skip(1).collect();
    println!("{}", run_isolated(&crawler_path(), &args));
}
