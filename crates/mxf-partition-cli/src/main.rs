use std::fs::File;
use std::path::PathBuf;

use clap::Parser;
use mxf_partition::{discovery, read_partition, read_rip, MxfFile, PartitionConfig, PartitionError};

#[derive(Debug, Parser)]
struct Args {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Debug, clap::Subcommand)]
enum Command {
    Inspect(InspectArgs),
}

#[derive(Debug, Parser)]
struct InspectArgs {
    input: PathBuf,
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let args = Args::parse();
    let verbose = match &args.cmd {
        Command::Inspect(args) => args.verbose,
    };

    simple_logger::SimpleLogger::new()
        .with_level(if verbose { log::LevelFilter::Trace } else { log::LevelFilter::Warn })
        .init()
        .unwrap();

    match args.cmd {
        Command::Inspect(args) => inspect(&args.input),
    }
}

fn inspect(path: &PathBuf) {
    let raw = File::open(path).unwrap_or_else(|err| {
        eprintln!("failed to open {}: {err}", path.display());
        std::process::exit(1);
    });
    let mut file = MxfFile::new(raw);
    let config = PartitionConfig::default();

    let (header_key, _llen, len) = match discovery::read_header_pack_kl_with_runin(&mut file, &config) {
        Ok(found) => found,
        Err(err) => {
            eprintln!("no header partition pack found: {err}");
            std::process::exit(1);
        }
    };

    println!("run-in: {} bytes", file.run_in_len());

    let mut partition = read_partition(&mut file, header_key).unwrap_or_else(|err| {
        eprintln!("failed to read header partition pack: {err}");
        std::process::exit(1);
    });
    print_partition(&partition, len);

    // The file is positioned right after the partition pack's value, so the
    // next KLV item starts `headerByteCount + indexByteCount` bytes further
    // on (the header-metadata and index-table regions this pack announces).
    loop {
        if partition.is_footer() {
            break;
        }
        let skip = (partition.header_byte_count + partition.index_byte_count) as i64;
        if file.skip(skip).is_err() {
            break;
        }
        let (key, _llen, value_len) = match file.read_kl() {
            Ok(found) => found,
            Err(_) => break,
        };
        if !mxf_partition::is_partition_pack(&key) {
            break;
        }
        partition = match read_partition(&mut file, key) {
            Ok(p) => p,
            Err(_) => break,
        };
        print_partition(&partition, value_len);
    }

    match read_rip(&mut file) {
        Ok(rip) => {
            println!("random index pack: {} entries", rip.entries.len());
            for entry in &rip.entries {
                println!("  bodySID={} thisPartition={}", entry.body_sid, entry.this_partition);
            }
        }
        Err(PartitionError::NoRandomIndexPack) => println!("no random index pack present"),
        Err(err) => eprintln!("failed to read random index pack: {err}"),
    }
}

fn print_partition(partition: &mxf_partition::Partition, value_len: u64) {
    println!(
        "partition at {}: kagSize={} bodySID={} indexSID={} headerByteCount={} indexByteCount={} ({value_len} value bytes)",
        partition.this_partition,
        partition.kag_size,
        partition.body_sid,
        partition.index_sid,
        partition.header_byte_count,
        partition.index_byte_count,
    );
}
