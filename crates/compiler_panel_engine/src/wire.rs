//! JSON shapes exchanged with the compile service.
use compiler_panel_core::{AsmLine, CompileRequest, CompileResult, FilterSet};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Serialize)]
pub(crate) struct WireRequest<'a> {
    source: &'a str,
    compiler: &'a str,
    options: &'a str,
    filters: &'a FilterSet,
}

impl<'a> From<&'a CompileRequest> for WireRequest<'a> {
    fn from(request: &'a CompileRequest) -> Self {
        Self {
            source: &request.source_text,
            compiler: &request.compiler,
            options: &request.options,
            filters: &request.filters,
        }
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct WireResponse {
    #[serde(default)]
    code: i32,
    /// Absent, `null` and `[]` all mean "no output".
    #[serde(default)]
    asm: Option<Vec<WireAsmLine>>,
}

#[derive(Debug, Deserialize)]
struct WireAsmLine {
    #[serde(default)]
    text: String,
    /// A bare line number, an object with a `line` field, or null.
    #[serde(default)]
    source: Option<Value>,
}

impl WireAsmLine {
    fn source_line(&self) -> Option<u32> {
        let line = match self.source.as_ref()? {
            Value::Number(n) => n.as_u64(),
            Value::Object(map) => map.get("line").and_then(Value::as_u64),
            _ => None,
        }?;
        u32::try_from(line).ok()
    }
}

impl From<WireResponse> for CompileResult {
    fn from(response: WireResponse) -> Self {
        let asm = response
            .asm
            .unwrap_or_default()
            .into_iter()
            .map(|line| {
                let source_line = line.source_line();
                AsmLine::new(line.text, source_line)
            })
            .collect();
        CompileResult {
            code: response.code,
            asm,
        }
    }
}
