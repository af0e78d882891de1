// src/pipeline/rectify.rs
use std::time::Instant;

use tracing::{debug, info};

use crate::assemble::{AssemblyBuffer, ReferenceAssembler};
use crate::config::RectifyOptions;
use crate::consensus::{Call, ConsensusResolver, CorrectionKind, ReportLog};
use crate::error::{RectifyError, Result};
use crate::io::fasta::FastaWriter;
use crate::io::pileup::{open_pileup, PileupReader, PileupRecord};
use crate::io::reference::{load_reference, read_chromosome_meta};
use crate::io::report::export_report;
use crate::pileup::tally_position;
use crate::stats::{write_summary, RectifySummary};

const PROGRESS_INTERVAL: usize = 2_000_000;

/// In-memory result of walking a pileup
pub struct Rectified {
    pub buffer: AssemblyBuffer,
    pub report: ReportLog,
    pub summary: RectifySummary,
}

/// Resolve every pileup record against `reference` and assemble the
/// corrected chromosome. Records must come in increasing position order.
pub fn rectify_pileup<I>(
    records: I,
    chrom: &str,
    reference: &[u8],
    options: &RectifyOptions,
) -> Result<Rectified>
where
    I: IntoIterator<Item = Result<PileupRecord>>,
{
    let resolver = ConsensusResolver::new(options.cutoff, options.min_depth);
    let mut assembler = ReferenceAssembler::new(reference);
    let mut report = ReportLog::new(options.max_report_entries);
    let mut summary = RectifySummary {
        chromosome: chrom.to_string(),
        reference_length: reference.len(),
        ..Default::default()
    };
    let mut next_progress = PROGRESS_INTERVAL;

    for record in records {
        let record = record?;
        summary.pileup_lines += 1;

        let tally = tally_position(
            record.position,
            record.reference_base,
            record.read_string,
            options.max_indel_variants,
        )
        .map_err(|e| RectifyError::from_scan(e, record.line, record.position))?;
        debug_assert!(tally.is_balanced());

        let resolution = resolver.resolve(&tally, chrom);
        match resolution.call {
            Call::LowDepth => summary.low_depth_positions += 1,
            Call::Ambiguous => summary.ambiguous_positions += 1,
            Call::Reference | Call::Corrected => {}
        }
        if let Some(entry) = resolution.report {
            debug!(
                "{} at {}:{} {} -> {} ({}:{})",
                entry.kind,
                entry.chrom,
                entry.position,
                entry.reference_base,
                entry.alternate,
                entry.depth,
                entry.alt_count
            );
            report.push(entry)?;
        }
        assembler.append(tally.position, resolution.unit)?;

        if tally.position >= next_progress {
            info!(
                "Processed {} / {} positions ({:.1}%)",
                tally.position,
                reference.len(),
                tally.position as f64 / reference.len() as f64 * 100.0
            );
            next_progress = (tally.position / PROGRESS_INTERVAL + 1) * PROGRESS_INTERVAL;
        }
    }

    let (buffer, backfilled) = assembler.finish();
    summary.covered_positions = summary.pileup_lines;
    summary.backfilled_positions = backfilled;
    summary.snps = report.count(CorrectionKind::Snp);
    summary.insertions = report.count(CorrectionKind::Ins);
    summary.deletions = report.count(CorrectionKind::Del);

    Ok(Rectified {
        buffer,
        report,
        summary,
    })
}

/// Run a full rectification: validate, load the reference, walk the
/// pileup, then write the FASTA, the report and the optional summary.
pub fn run_rectify(options: &RectifyOptions) -> Result<RectifySummary> {
    options.validate()?;
    let start = Instant::now();

    let meta = read_chromosome_meta(&options.reference)?;
    info!(
        "Rectifying {} ({} bp) with cutoff {}",
        meta.name, meta.length, options.cutoff
    );
    let reference = load_reference(&options.reference, &meta)?;

    info!("Walking pileup {}", options.input.display());
    let reader = PileupReader::new(
        open_pileup(&options.input)?,
        &options.input,
        options.max_line_length,
    );
    let Rectified {
        buffer,
        report,
        mut summary,
    } = rectify_pileup(reader, &meta.name, &reference, options)?;

    info!("Writing rectified reference to {}", options.output.display());
    let io_err = |e| RectifyError::io(&options.output, e);
    let mut writer = FastaWriter::append(&options.output).map_err(io_err)?;
    summary.output_length = writer
        .write_rectified(&meta.name, &buffer, options.line_width)
        .map_err(io_err)?;
    writer.finish().map_err(io_err)?;

    info!(
        "Writing {} corrections to {}",
        report.len(),
        options.report.display()
    );
    export_report(report.entries(), &options.report)
        .map_err(|e| RectifyError::io(&options.report, e))?;

    if let Some(path) = &options.summary {
        write_summary(&summary, options, path).map_err(|e| RectifyError::io(path, e))?;
    }

    info!(
        "Done in {:.2}s: {} SNPs, {} insertions, {} deletions, {} low-depth positions",
        start.elapsed().as_secs_f32(),
        summary.snps,
        summary.insertions,
        summary.deletions,
        summary.low_depth_positions
    );
    Ok(summary)
}
