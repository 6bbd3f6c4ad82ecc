//! Request/response value types exchanged across the computation boundary.
//!
//! Wire shape (JSON):
//!
//! ```text
//! request  { id, generation, kind, parameters: {..} }
//! response { id, generation, kind, result: {type, value} | null, error: string | null,
//!            degenerate_denominator: true (omitted when false) }
//! ```

use core::fmt;

use cs_controls::{FrequencySample, PidGains, PidOutput, PidState};
use serde::{Deserialize, Serialize};

/// Opaque correlation token, unique per request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestId(pub u64);

impl RequestId {
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "req-{}", self.0)
    }
}

/// Calculation selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComputeKind {
    Pid,
    TransferFunction,
    StepResponse,
    FrequencyResponse,
}

impl fmt::Display for ComputeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Pid => "pid",
            Self::TransferFunction => "transfer_function",
            Self::StepResponse => "step_response",
            Self::FrequencyResponse => "frequency_response",
        };
        f.write_str(s)
    }
}

/// PID step parameters. State defaults to zero when omitted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PidParams {
    #[serde(flatten)]
    pub gains: PidGains,
    pub setpoint: f64,
    pub process_value: f64,
    pub dt: f64,
    #[serde(default)]
    pub previous_error: f64,
    #[serde(default)]
    pub integral: f64,
}

impl PidParams {
    pub fn state(&self) -> PidState {
        PidState {
            previous_error: self.previous_error,
            integral: self.integral,
        }
    }
}

/// Kind-specific parameter record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "parameters", rename_all = "snake_case")]
pub enum ComputeParams {
    Pid(PidParams),
    TransferFunction {
        numerator: Vec<f64>,
        denominator: Vec<f64>,
        input: Vec<f64>,
    },
    StepResponse {
        numerator: Vec<f64>,
        denominator: Vec<f64>,
        amplitude: f64,
        duration: f64,
        sample_time: f64,
    },
    FrequencyResponse {
        numerator: Vec<f64>,
        denominator: Vec<f64>,
        frequencies: Vec<f64>,
    },
}

impl ComputeParams {
    pub fn kind(&self) -> ComputeKind {
        match self {
            Self::Pid(_) => ComputeKind::Pid,
            Self::TransferFunction { .. } => ComputeKind::TransferFunction,
            Self::StepResponse { .. } => ComputeKind::StepResponse,
            Self::FrequencyResponse { .. } => ComputeKind::FrequencyResponse,
        }
    }
}

/// A calculation request, stamped with the run generation that issued it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComputeRequest {
    pub id: RequestId,
    pub generation: u64,
    #[serde(flatten)]
    pub params: ComputeParams,
}

impl ComputeRequest {
    pub fn new(id: RequestId, generation: u64, params: ComputeParams) -> Self {
        Self {
            id,
            generation,
            params,
        }
    }

    pub fn kind(&self) -> ComputeKind {
        self.params.kind()
    }
}

/// Kind-specific result value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum ComputeOutput {
    Pid(PidOutput),
    Sequence(Vec<f64>),
    Frequency(Vec<FrequencySample>),
}

/// Exactly one per request, matched by `id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComputeResponse {
    pub id: RequestId,
    pub generation: u64,
    pub kind: ComputeKind,
    pub result: Option<ComputeOutput>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Set when the denominator's leading coefficient was zero and the
    /// recursion substituted 1.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub degenerate_denominator: bool,
}

impl ComputeResponse {
    pub fn ok(request: &ComputeRequest, result: ComputeOutput) -> Self {
        Self {
            id: request.id,
            generation: request.generation,
            kind: request.kind(),
            result: Some(result),
            error: None,
            degenerate_denominator: false,
        }
    }

    pub fn failed(request: &ComputeRequest, error: impl Into<String>) -> Self {
        Self {
            id: request.id,
            generation: request.generation,
            kind: request.kind(),
            result: None,
            error: Some(error.into()),
            degenerate_denominator: false,
        }
    }

    /// Result or error message, for callers that want a `Result`.
    pub fn into_result(self) -> Result<ComputeOutput, String> {
        match (self.result, self.error) {
            (_, Some(e)) => Err(e),
            (Some(r), None) => Ok(r),
            (None, None) => Err(format!("{} response {} carried no result", self.kind, self.id)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_wire_shape() {
        let req = ComputeRequest::new(
            RequestId::new(7),
            2,
            ComputeParams::TransferFunction {
                numerator: vec![1.0],
                denominator: vec![1.0],
                input: vec![1.0],
            },
        );
        let v: serde_json::Value = serde_json::to_value(&req).unwrap();
        assert_eq!(v["id"], 7);
        assert_eq!(v["generation"], 2);
        assert_eq!(v["kind"], "transfer_function");
        assert_eq!(v["parameters"]["input"][0], 1.0);

        let back: ComputeRequest = serde_json::from_value(v).unwrap();
        assert_eq!(back, req);
    }

    #[test]
    fn pid_state_defaults_to_zero() {
        let json = r#"{
            "id": 1, "generation": 0, "kind": "pid",
            "parameters": {"kp": 1.0, "ki": 0.0, "kd": 0.0,
                           "setpoint": 1.0, "process_value": 0.5, "dt": 0.01}
        }"#;
        let req: ComputeRequest = serde_json::from_str(json).unwrap();
        match req.params {
            ComputeParams::Pid(p) => assert_eq!(p.state(), PidState::default()),
            other => panic!("unexpected params {other:?}"),
        }
    }

    #[test]
    fn failed_response_reports_error() {
        let req = ComputeRequest::new(
            RequestId::new(3),
            0,
            ComputeParams::FrequencyResponse {
                numerator: vec![],
                denominator: vec![1.0],
                frequencies: vec![1.0],
            },
        );
        let resp = ComputeResponse::failed(&req, "boom");
        assert_eq!(resp.kind, ComputeKind::FrequencyResponse);
        assert_eq!(resp.into_result(), Err("boom".to_string()));
    }
}
