use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use flate2::write::GzEncoder;
use flate2::Compression;
use refrectify::error::RectifyError;
use refrectify::{run_rectify, RectifyOptions};
use tempfile::TempDir;

/// 200 bp of ACGT repeats: position p (1-based) holds "ACGT"[(p - 1) % 4]
fn reference_bases() -> String {
    "ACGT".repeat(50)
}

struct Fixture {
    dir: TempDir,
    reference: PathBuf,
}

impl Fixture {
    fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let reference = dir.path().join("ref.fa");
        let seq = reference_bases().to_lowercase();

        let mut fasta = fs::File::create(&reference).unwrap();
        writeln!(fasta, ">chr1").unwrap();
        for chunk in seq.as_bytes().chunks(60) {
            fasta.write_all(chunk).unwrap();
            fasta.write_all(b"\n").unwrap();
        }
        fs::write(dir.path().join("ref.fa.fai"), "chr1\t200\t6\t60\t61\n").unwrap();

        Fixture { dir, reference }
    }

    fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    fn options(&self, pileup: &Path) -> RectifyOptions {
        let mut options = RectifyOptions::new(pileup, self.path("out.fa"), &self.reference);
        options.report = self.path("rectify.report");
        options
    }

    fn write_pileup(&self, lines: &[(usize, char, String)]) -> PathBuf {
        let path = self.path("in.mp");
        fs::write(&path, pileup_text(lines)).unwrap();
        path
    }
}

fn pileup_text(lines: &[(usize, char, String)]) -> String {
    lines
        .iter()
        .map(|(pos, base, reads)| {
            format!(
                "chr1\t{}\t{}\t{}\t{}\t{}\n",
                pos,
                base,
                reads.len(),
                reads,
                "I".repeat(reads.len())
            )
        })
        .collect()
}

/// Header and sequence lines of the output FASTA
fn read_output(path: &Path) -> (String, Vec<String>) {
    let text = fs::read_to_string(path).unwrap();
    let mut lines = text.lines().map(str::to_string);
    let header = lines.next().unwrap();
    (header, lines.collect())
}

fn report_rows(path: &Path) -> Vec<String> {
    fs::read_to_string(path)
        .unwrap()
        .lines()
        .skip(1)
        .map(str::to_string)
        .collect()
}

#[test]
fn test_substitution_with_gap_backfill() {
    let fx = Fixture::new();
    let pileup = fx.write_pileup(&[
        (100, 'T', format!(".{}", "G".repeat(19))),
        (105, 'A', ",".repeat(12)),
    ]);
    let summary = run_rectify(&fx.options(&pileup)).unwrap();

    let (header, lines) = read_output(&fx.path("out.fa"));
    assert_eq!(header, ">chr1\tComplete Genome");
    let sequence: String = lines.concat();

    let mut expected = reference_bases().into_bytes();
    expected[99] = b'G';
    assert_eq!(sequence.as_bytes(), &expected[..]);
    // Positions 101-104 come straight from the reference
    assert_eq!(&sequence[100..104], "ACGT");

    assert_eq!(
        report_rows(&fx.path("rectify.report")),
        vec!["chr1\t100\tSNP\tT\tG\t20:19"]
    );
    assert_eq!(summary.snps, 1);
    assert_eq!(summary.output_length, 200);
}

#[test]
fn test_insertion_is_written_after_anchor() {
    let fx = Fixture::new();
    let pileup = fx.write_pileup(&[(1, 'A', ".+2AT".repeat(10))]);
    let summary = run_rectify(&fx.options(&pileup)).unwrap();

    let (_, lines) = read_output(&fx.path("out.fa"));
    let sequence: String = lines.concat();
    assert!(sequence.starts_with("AATCGTACGT"));
    assert_eq!(sequence.len(), 202);
    assert_eq!(summary.length_delta(), 2);

    assert_eq!(
        report_rows(&fx.path("rectify.report")),
        vec!["chr1\t1\tINS\tA\tA+2AT\t10:10"]
    );
}

#[test]
fn test_deletion_drops_following_base() {
    let fx = Fixture::new();
    let pileup = fx.write_pileup(&[(3, 'G', ",-1t".repeat(10))]);
    run_rectify(&fx.options(&pileup)).unwrap();

    let (_, lines) = read_output(&fx.path("out.fa"));
    let sequence: String = lines.concat();
    let reference = reference_bases();
    assert_eq!(sequence, format!("{}{}", &reference[..3], &reference[4..]));

    assert_eq!(
        report_rows(&fx.path("rectify.report")),
        vec!["chr1\t3\tDEL\tG\tG-1T\t10:10"]
    );
}

#[test]
fn test_lines_are_fifty_columns() {
    let fx = Fixture::new();
    let pileup = fx.write_pileup(&[(7, 'G', ".+3CCC".repeat(15))]);
    run_rectify(&fx.options(&pileup)).unwrap();

    let (_, lines) = read_output(&fx.path("out.fa"));
    let (last, full) = lines.split_last().unwrap();
    assert!(full.iter().all(|l| l.len() == 50));
    assert_eq!(last.len(), 3);
}

#[test]
fn test_low_coverage_pileup_leaves_reference_untouched() {
    let fx = Fixture::new();
    let pileup = fx.write_pileup(&[
        (50, 'C', "TTTTTTTTT".to_string()),
        (51, 'G', ".".repeat(40)),
    ]);
    let summary = run_rectify(&fx.options(&pileup)).unwrap();

    let (_, lines) = read_output(&fx.path("out.fa"));
    assert_eq!(lines.concat(), reference_bases());
    assert!(report_rows(&fx.path("rectify.report")).is_empty());
    assert_eq!(summary.low_depth_positions, 1);
}

#[test]
fn test_gzipped_pileup_and_summary() {
    let fx = Fixture::new();
    let path = fx.path("in.mp.gz");
    let mut gz = GzEncoder::new(fs::File::create(&path).unwrap(), Compression::default());
    gz.write_all(pileup_text(&[(2, 'C', "a".repeat(10))]).as_bytes())
        .unwrap();
    gz.finish().unwrap();

    let mut options = fx.options(&path);
    options.summary = Some(fx.path("summary.json"));
    run_rectify(&options).unwrap();

    let (_, lines) = read_output(&fx.path("out.fa"));
    assert!(lines.concat().starts_with("AAGT"));
    let summary: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(fx.path("summary.json")).unwrap()).unwrap();
    assert_eq!(summary["summary"]["snps"], 1);
}

#[test]
fn test_output_is_appended() {
    let fx = Fixture::new();
    let pileup = fx.write_pileup(&[(1, 'A', ".".repeat(10))]);
    run_rectify(&fx.options(&pileup)).unwrap();
    run_rectify(&fx.options(&pileup)).unwrap();

    let text = fs::read_to_string(fx.path("out.fa")).unwrap();
    assert_eq!(text.matches(">chr1").count(), 2);
}

#[test]
fn test_invalid_cutoff_rejected_before_reading() {
    let mut options = RectifyOptions::new("/missing/in.mp", "/missing/out.fa", "/missing/ref.fa");
    options.cutoff = 0.5;
    assert!(matches!(run_rectify(&options), Err(RectifyError::Config(_))));
}

#[test]
fn test_malformed_pileup_fails_run() {
    let fx = Fixture::new();
    let pileup = fx.path("in.mp");
    fs::write(&pileup, "chr1\t4\tT\t2\t.-9A\tII\n").unwrap();

    match run_rectify(&fx.options(&pileup)) {
        Err(RectifyError::Parse { line, .. }) => assert_eq!(line, 1),
        other => panic!("unexpected: {:?}", other),
    }
    assert!(!fx.path("rectify.report").exists());
}

#[test]
fn test_unsorted_pileup_fails_run() {
    let fx = Fixture::new();
    let pileup = fx.write_pileup(&[
        (9, 'A', ".".repeat(10)),
        (8, 'T', ".".repeat(10)),
    ]);
    assert!(matches!(
        run_rectify(&fx.options(&pileup)),
        Err(RectifyError::PositionOutOfOrder { position: 8, previous: 9 })
    ));
}
