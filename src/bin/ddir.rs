extern crate clap;
extern crate d64dir;

use clap::{App, Arg};
use std::io;
use std::process;

use d64dir::disk::{DiskDirectory, Image};
use d64dir::render::{ListingRenderer, Render, ScreenRenderer};

static EXIT_FAILURE: i32 = 1;

fn main() {
    // Parse command-line arguments
    let matches = App::new("D64 Directory Utility")
        .version("0.1.0")
        .about("Decode and display the directory of D64 disk images.")
        .arg(Arg::with_name("diskimage").required(true))
        .arg(
            Arg::with_name("screen")
                .short("s")
                .long("screen")
                .help("Output rows of C64 screen codes in hex instead of text"),
        )
        .arg(
            Arg::with_name("debug")
                .short("d")
                .long("debug")
                .help("Show the decoded directory structures"),
        )
        .get_matches();

    let diskimage = matches.value_of("diskimage").unwrap();
    let result = if matches.is_present("screen") {
        cmd_screen(diskimage)
    } else if matches.is_present("debug") {
        cmd_debug(diskimage)
    } else {
        cmd_dir(diskimage)
    };
    if let Err(e) = result {
        eprintln!("Error: {}", e);
        process::exit(EXIT_FAILURE);
    }
}

fn decode(diskimage: &str) -> io::Result<DiskDirectory> {
    let image = Image::open_read_only(diskimage)?;
    DiskDirectory::read(image.bytes())
}

fn cmd_dir(diskimage: &str) -> io::Result<()> {
    let directory = decode(diskimage)?;
    print!("{}", ListingRenderer.render(&directory));
    Ok(())
}

fn cmd_screen(diskimage: &str) -> io::Result<()> {
    let directory = decode(diskimage)?;
    for row in ScreenRenderer.render(&directory) {
        let codes: Vec<String> = row.iter().map(|code| format!("{:02x}", code)).collect();
        println!("{}", codes.join(" "));
    }
    Ok(())
}

fn cmd_debug(diskimage: &str) -> io::Result<()> {
    let directory = decode(diskimage)?;
    print!("{:?}", directory);
    Ok(())
}
