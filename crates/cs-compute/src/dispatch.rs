//! Request dispatch: one request in, exactly one response out.

use std::panic::{self, AssertUnwindSafe};

use cs_controls::{ControlError, ControlResult, TransferFunction, pid};
use tracing::{debug, warn};

use crate::message::{ComputeOutput, ComputeParams, ComputeRequest, ComputeResponse};

/// Calculator output plus whether `a[0] = 0` was replaced by 1.
struct Computed {
    output: ComputeOutput,
    degenerate_denominator: bool,
}

impl From<ComputeOutput> for Computed {
    fn from(output: ComputeOutput) -> Self {
        Self {
            output,
            degenerate_denominator: false,
        }
    }
}

fn compute(params: &ComputeParams) -> ControlResult<Computed> {
    match params {
        ComputeParams::Pid(p) => {
            let out = pid(&p.gains, p.setpoint, p.process_value, p.dt, p.state())?;
            Ok(ComputeOutput::Pid(out).into())
        }
        ComputeParams::TransferFunction {
            numerator,
            denominator,
            input,
        } => {
            let tf = TransferFunction::new(numerator, denominator)?;
            Ok(Computed {
                output: ComputeOutput::Sequence(tf.evaluate(input)),
                degenerate_denominator: tf.a0_is_degenerate(),
            })
        }
        ComputeParams::StepResponse {
            numerator,
            denominator,
            amplitude,
            duration,
            sample_time,
        } => {
            let tf = TransferFunction::new(numerator, denominator)?;
            let response = tf.step_response(*amplitude, *duration, *sample_time)?;
            Ok(Computed {
                output: ComputeOutput::Sequence(response.output),
                degenerate_denominator: tf.a0_is_degenerate(),
            })
        }
        ComputeParams::FrequencyResponse {
            numerator,
            denominator,
            frequencies,
        } => {
            let tf = TransferFunction::new(numerator, denominator)?;
            Ok(ComputeOutput::Frequency(tf.frequency_response(frequencies)).into())
        }
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

/// Run the calculator named by `request` and wrap the outcome.
///
/// A panic inside a calculator is converted into a
/// [`ControlError::ComputationFailure`] message.
pub fn handle(request: &ComputeRequest) -> ComputeResponse {
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| compute(&request.params)))
        .unwrap_or_else(|payload| {
            Err(ControlError::ComputationFailure {
                message: panic_message(payload.as_ref()),
            })
        });

    match outcome {
        Ok(computed) => {
            if computed.degenerate_denominator {
                warn!(
                    id = %request.id,
                    kind = %request.kind(),
                    "denominator leading coefficient is zero, recursion uses a0 = 1"
                );
            }
            debug!(id = %request.id, kind = %request.kind(), "computed");
            let mut response = ComputeResponse::ok(request, computed.output);
            response.degenerate_denominator = computed.degenerate_denominator;
            response
        }
        Err(e) => {
            warn!(id = %request.id, kind = %request.kind(), error = %e, "computation failed");
            ComputeResponse::failed(request, e.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::{PidParams, RequestId};
    use cs_controls::PidGains;

    fn request(params: ComputeParams) -> ComputeRequest {
        ComputeRequest::new(RequestId::new(11), 4, params)
    }

    #[test]
    fn pid_request_round_trip() {
        let req = request(ComputeParams::Pid(PidParams {
            gains: PidGains::new(1.0, 0.0, 0.0),
            setpoint: 1.0,
            process_value: 0.5,
            dt: 0.01,
            previous_error: 0.0,
            integral: 0.0,
        }));
        let resp = handle(&req);
        assert_eq!(resp.id, req.id);
        assert_eq!(resp.generation, 4);
        match resp.into_result().unwrap() {
            ComputeOutput::Pid(out) => assert!((out.output - 0.5).abs() < 1e-12),
            other => panic!("unexpected output {other:?}"),
        }
    }

    #[test]
    fn invalid_dt_becomes_error_string() {
        let req = request(ComputeParams::Pid(PidParams {
            gains: PidGains::default(),
            setpoint: 1.0,
            process_value: 0.5,
            dt: 0.0,
            previous_error: 0.0,
            integral: 0.0,
        }));
        let resp = handle(&req);
        assert!(resp.result.is_none());
        assert!(resp.error.unwrap().contains("dt"));
    }

    #[test]
    fn step_response_request() {
        let req = request(ComputeParams::StepResponse {
            numerator: vec![1.0],
            denominator: vec![1.0],
            amplitude: 2.0,
            duration: 0.02,
            sample_time: 0.01,
        });
        assert_eq!(
            handle(&req).into_result().unwrap(),
            ComputeOutput::Sequence(vec![2.0, 2.0])
        );
    }

    #[test]
    fn zero_a0_is_flagged_in_the_response() {
        let req = request(ComputeParams::TransferFunction {
            numerator: vec![1.0],
            denominator: vec![0.0, 1.0],
            input: vec![1.0, 0.0],
        });
        let resp = handle(&req);
        assert!(resp.degenerate_denominator);
        assert_eq!(
            resp.into_result().unwrap(),
            ComputeOutput::Sequence(vec![1.0, -1.0])
        );

        let step = request(ComputeParams::StepResponse {
            numerator: vec![1.0],
            denominator: vec![0.0, 1.0],
            amplitude: 1.0,
            duration: 0.02,
            sample_time: 0.01,
        });
        assert!(handle(&step).degenerate_denominator);

        let normal = request(ComputeParams::TransferFunction {
            numerator: vec![1.0],
            denominator: vec![1.0],
            input: vec![1.0],
        });
        assert!(!handle(&normal).degenerate_denominator);
    }

    #[test]
    fn oversized_step_request_is_reported_not_thrown() {
        let req = request(ComputeParams::StepResponse {
            numerator: vec![1.0],
            denominator: vec![1.0],
            amplitude: 1.0,
            duration: 1e300,
            sample_time: 1e-300,
        });
        let resp = handle(&req);
        assert!(resp.result.is_none());
        assert!(resp.error.unwrap().contains("Invalid parameter"));
    }

    #[test]
    fn frequency_request_keeps_degenerate_points() {
        let req = request(ComputeParams::FrequencyResponse {
            numerator: vec![1.0],
            denominator: vec![1.0, 0.0],
            frequencies: vec![0.0, 1.0],
        });
        match handle(&req).into_result().unwrap() {
            ComputeOutput::Frequency(samples) => {
                assert!(samples[0].is_degenerate());
                assert!(!samples[1].is_degenerate());
            }
            other => panic!("unexpected output {other:?}"),
        }
    }

    #[test]
    fn empty_numerator_is_reported_not_thrown() {
        let req = request(ComputeParams::TransferFunction {
            numerator: vec![],
            denominator: vec![1.0],
            input: vec![1.0],
        });
        let resp = handle(&req);
        assert_eq!(resp.id, req.id);
        assert!(resp.error.is_some());
    }
}
