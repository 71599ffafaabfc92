use anyhow::{bail, ensure, Context, Result};
use bio::io::fasta;
use clap::{value_parser, Parser};
use ea_nw::{Fill, NW};
use ea_types::{Cost, LinearCost, Seq};
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::{
    fs::File,
    io::{self, BufRead, BufReader},
    ops::ControlFlow,
    path::{Path, PathBuf},
};

/// Align a source string to a target string with the minimal total cost of
/// insertions, deletions and substitutions.
///
/// Prints the cost table and the aligned source, operation and target rows.
/// Without SOURCE/TARGET or --input, pairs of lines are read from stdin.
#[derive(Parser, Serialize, Deserialize, Debug)]
#[clap(author, version, about)]
pub struct Cli {
    /// The string to transform.
    #[clap(requires = "target", conflicts_with = "input")]
    pub source: Option<String>,

    /// The string to transform into.
    pub target: Option<String>,

    /// A .seq, .txt, or Fasta file with sequence pairs to align, or a directory of them.
    #[clap(short, long, value_parser = value_parser!(PathBuf), display_order = 1)]
    pub input: Option<PathBuf>,

    /// Write a .csv of `{cost},{cigar}` lines
    #[clap(short, long, value_parser = value_parser!(PathBuf), display_order = 1)]
    pub output: Option<PathBuf>,

    #[clap(flatten)]
    pub costs: CostArgs,

    /// Print one JSON record per pair instead of the table and rows.
    #[clap(long)]
    pub json: bool,

    /// Do not print the cost table.
    #[clap(long)]
    pub no_table: bool,

    /// Print less. Pass twice for summary line only.
    ///
    /// Once: print a `{cost} {cigar}` line per pair.
    /// Twice: only print the number of pairs and their total cost.
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub silent: u8,

    /// Log more. Pass up to four times for trace logging.
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Parser, Serialize, Deserialize, Debug, Clone)]
#[clap(next_help_heading = "Cost model")]
pub struct CostArgs {
    /// Cost of inserting a character of the target.
    #[clap(long, default_value_t = 1, allow_negative_numbers = true)]
    pub ins: Cost,

    /// Cost of deleting a character of the source.
    #[clap(long, default_value_t = 1, allow_negative_numbers = true)]
    pub del: Cost,

    /// Cost of substituting a character by a different one.
    #[clap(long, default_value_t = 1, allow_negative_numbers = true)]
    pub sub: Cost,

    /// Marker for the side that consumes no character. Must not occur in the input.
    #[clap(long, default_value_t = '*')]
    pub placeholder: char,

    /// Order in which the cost table is filled.
    #[clap(long, value_enum, default_value_t, hide_short_help = true)]
    pub fill: Fill,
}

impl CostArgs {
    /// Validate the arguments and build the aligner.
    pub fn aligner(&self) -> Result<NW> {
        let cm = LinearCost::new(self.ins, self.del, self.sub)?;
        ensure!(
            self.placeholder.is_ascii(),
            "placeholder {:?} is not a single byte character",
            self.placeholder
        );
        Ok(NW {
            cm,
            placeholder: self.placeholder as u8,
            fill: self.fill,
        })
    }
}

impl Cli {
    /// Call the given function for each pair in the input.
    pub fn process_input_pairs(
        &self,
        mut run_pair: impl FnMut(Seq, Seq) -> Result<ControlFlow<()>>,
    ) -> Result<()> {
        if let (Some(a), Some(b)) = (&self.source, &self.target) {
            run_pair(a.as_bytes(), b.as_bytes())?;
            return Ok(());
        }

        let Some(input) = &self.input else {
            log::info!("Reading pairs of lines from stdin");
            return run_line_pairs(io::stdin().lock(), false, &mut run_pair).map(|_| ());
        };

        let files = if input.is_file() {
            vec![input.clone()]
        } else {
            input
                .read_dir()
                .with_context(|| format!("{} is not a file or directory", input.display()))?
                .map(|x| Ok(x?.path()))
                .collect::<io::Result<Vec<_>>>()?
                .into_iter()
                .sorted()
                .collect_vec()
        };

        for f in files {
            log::info!("Reading {}", f.display());
            if let ControlFlow::Break(()) = run_file(&f, &mut run_pair)? {
                break;
            }
        }
        Ok(())
    }
}

fn run_file(
    f: &Path,
    run_pair: &mut impl FnMut(Seq, Seq) -> Result<ControlFlow<()>>,
) -> Result<ControlFlow<()>> {
    let Some(ext) = f.extension() else {
        bail!("{} has no file extension", f.display());
    };
    let open = || File::open(f).with_context(|| format!("Failed to open {}", f.display()));
    match ext {
        ext if ext == "seq" || ext == "txt" => {
            run_line_pairs(BufReader::new(open()?), ext == "seq", run_pair)
        }
        ext if ext == "fna" || ext == "fa" || ext == "fasta" => {
            let mut records = fasta::Reader::new(BufReader::new(open()?))
                .records()
                .tuples();
            for (a, b) in records.by_ref() {
                let (a, b) = (a?, b?);
                if let ControlFlow::Break(()) = run_pair(a.seq(), b.seq())? {
                    return Ok(ControlFlow::Break(()));
                }
            }
            ensure!(
                records.into_buffer().next().is_none(),
                "{} has an odd number of records",
                f.display()
            );
            Ok(ControlFlow::Continue(()))
        }
        ext => bail!(
            "Unknown file extension {ext:?}. Must be in {{seq,txt,fna,fa,fasta}}."
        ),
    }
}

/// Each two consecutive lines form a pair. In `.seq` files they start with
/// `>` and `<`.
fn run_line_pairs(
    reader: impl BufRead,
    seq_markers: bool,
    run_pair: &mut impl FnMut(Seq, Seq) -> Result<ControlFlow<()>>,
) -> Result<ControlFlow<()>> {
    let mut pairs = reader.lines().map(|l| l.map(String::into_bytes)).tuples();
    for (a, b) in pairs.by_ref() {
        let (mut a, mut b) = (a?, b?);
        if seq_markers {
            ensure!(a.first() == Some(&b'>'), "source line must start with '>'");
            ensure!(b.first() == Some(&b'<'), "target line must start with '<'");
            a.remove(0);
            b.remove(0);
        }
        if let ControlFlow::Break(()) = run_pair(&a, &b)? {
            return Ok(ControlFlow::Break(()));
        }
    }
    if let Some(last) = pairs.into_buffer().next() {
        bail!(
            "odd number of lines: {:?} has no line to pair with",
            String::from_utf8_lossy(&last?)
        );
    }
    Ok(ControlFlow::Continue(()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(input: &str, seq_markers: bool) -> Result<Vec<(Vec<u8>, Vec<u8>)>> {
        let mut pairs = vec![];
        run_line_pairs(input.as_bytes(), seq_markers, &mut |a: Seq, b: Seq| {
            pairs.push((a.to_vec(), b.to_vec()));
            Ok(ControlFlow::Continue(()))
        })?;
        Ok(pairs)
    }

    #[test]
    fn line_pairs() {
        let pairs = collect("kitten\r\nsitting\n\nabc\n", false).unwrap();
        assert_eq!(
            pairs,
            vec![
                (b"kitten".to_vec(), b"sitting".to_vec()),
                (b"".to_vec(), b"abc".to_vec())
            ]
        );
    }

    #[test]
    fn odd_trailing_line_is_an_error() {
        let err = collect("kitten\nsitting\nabc\n", false).unwrap_err();
        assert!(err.to_string().contains("\"abc\""), "{err}");
        assert!(collect(">ACGT\n<AGT\n>AC\n", true).is_err());
    }

    #[test]
    fn seq_markers() {
        let pairs = collect(">ACGT\n<AGT\n", true).unwrap();
        assert_eq!(pairs, vec![(b"ACGT".to_vec(), b"AGT".to_vec())]);
        assert!(collect("ACGT\n<AGT\n", true).is_err());
    }

    #[test]
    fn cost_args_are_validated() {
        let cli = Cli::try_parse_from(["ea-bin", "a", "b", "--ins", "-1"]).unwrap();
        assert!(cli.costs.aligner().is_err());
        let cli = Cli::try_parse_from(["ea-bin", "a", "b", "--placeholder", "é"]).unwrap();
        assert!(cli.costs.aligner().is_err());
        let cli = Cli::try_parse_from(["ea-bin", "a", "b", "--placeholder", "-"]).unwrap();
        assert_eq!(cli.costs.aligner().unwrap().placeholder, b'-');
    }

    #[test]
    fn source_requires_target() {
        assert!(Cli::try_parse_from(["ea-bin", "a"]).is_err());
    }
}
