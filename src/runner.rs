//! The single request/print cycle.

use std::io::Write;

use crate::{Error, LLMProvider, Prompt};

pub const REQUEST_HEADER: &str = "--- request ---";
pub const RESPONSE_HEADER: &str = "--- Response ---";

/// Echo the request, call `provider` once and write the rendered response to `out`.
///
/// On a failed call a one-line notice is written to `out` and the error is
/// returned; no response block is written.
pub async fn run<P, W>(provider: &P, prompt: &Prompt, out: &mut W) -> Result<(), Error>
where
    P: LLMProvider + ?Sized,
    W: Write,
{
    writeln!(out, "{REQUEST_HEADER}")?;
    writeln!(out, "{}", prompt.request())?;

    let response = match provider.generate(prompt).await {
        Ok(response) => response,
        Err(e) => {
            writeln!(out, "Request failed: {e}")?;
            return Err(e);
        }
    };

    writeln!(out, "{RESPONSE_HEADER}")?;
    writeln!(out, "{}", response.render())?;
    Ok(())
}
