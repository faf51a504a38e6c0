use crate::format::codec_for;
use crate::{FailureKind, OutputContract, ParseError, ParseOutput, ProcessOutcome};

/// Reads the engine's declared output file into an in-memory artifact.
///
/// Only called on a zero-exit outcome. A read or decode failure still converts
/// the invocation into a failure: the process honored its exit-code contract
/// but not its output contract.
pub fn materialize(
    contract: &OutputContract,
    outcome: &ProcessOutcome,
) -> Result<ParseOutput, ParseError> {
    let codec = codec_for(contract.format);
    let artifact = (codec.materialize)(&contract.path).map_err(|err| {
        ParseError::new(
            FailureKind::Materialization,
            format!("Failed to read output: {err}"),
            outcome.stderr.clone(),
        )
    })?;

    Ok(ParseOutput {
        record_count: (codec.count_records)(&artifact),
        artifact,
        format: contract.format,
        diagnostic_log: outcome.stderr.clone(),
        output_path: contract.path.clone(),
    })
}
