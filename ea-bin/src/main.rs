use anyhow::{Context, Result};
use clap::Parser;
use ea_bin::{
    cli::Cli,
    output::{format_alignment, PairRecord, Summary},
};
use ea_types::Seq;
use std::{
    fs::File,
    io::{BufWriter, Write},
    ops::ControlFlow,
    process::ExitCode,
};

fn main() -> ExitCode {
    let args = Cli::parse();

    let log_level = match args.verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    env_logger::Builder::from_default_env()
        .filter_level(log_level)
        .format_timestamp(None)
        .format_target(false)
        .init();

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Cli) -> Result<()> {
    let aligner = args.costs.aligner()?;
    log::info!("{:?}, {:?}", aligner.cm, aligner.tie_break());

    let mut output = match &args.output {
        Some(path) => Some(BufWriter::new(File::create(path).with_context(|| {
            format!("Failed to create output file {}", path.display())
        })?)),
        None => None,
    };

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let mut summary = Summary::default();

    args.process_input_pairs(|a: Seq, b: Seq| {
        let (table, aln) = aligner.compute(a, b)?;
        summary.add(&table, &aln);

        if let Some(output) = &mut output {
            writeln!(output, "{},{}", table.cost(), aln.to_cigar())?;
        }

        if args.json {
            let record = PairRecord::new(a, b, &table, &aln, !args.no_table);
            writeln!(out, "{}", serde_json::to_string(&record)?)?;
        } else if args.silent == 1 {
            writeln!(out, "{} {}", table.cost(), aln.to_cigar())?;
        } else if args.silent == 0 {
            if !args.no_table {
                writeln!(out, "{}", table.display(a, b))?;
            }
            writeln!(out, "{}", format_alignment(&table, &aln))?;
        }
        Ok(ControlFlow::Continue(()))
    })?;

    if let Some(mut output) = output {
        output.flush()?;
    }
    if args.silent >= 2 {
        writeln!(out, "{summary}")?;
    }
    log::info!("{summary}");
    Ok(())
}

#[cfg(test)]
mod test {
    #[test]
    fn cli_test() {
        <super::Cli as clap::CommandFactory>::command().debug_assert();
    }
}
