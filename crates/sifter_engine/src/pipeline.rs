use sifter_logging::engine_debug;

use crate::materialize::materialize;
use crate::{EngineInvoker, InvocationRequest, OutputContract, ParseError, ParseOutput};

/// Runs one full invocation: launch the engine against the contract, then
/// materialize its declared output. Resolves exactly once per call.
pub async fn run_parse(
    invoker: &dyn EngineInvoker,
    request: &InvocationRequest,
    contract: &OutputContract,
) -> Result<ParseOutput, ParseError> {
    let outcome = invoker.invoke(request, contract).await?;
    engine_debug!(
        "Engine exited 0 (stdout {} bytes, stderr {} bytes)",
        outcome.stdout.len(),
        outcome.stderr.len()
    );
    materialize(contract, &outcome)
}
