//! The cycle-stepped simulation driver.
//!
//! [`Simulator`] owns one run: it validates the circuit's input traces at
//! construction, then steps through cycle 0 ([`initialize`](Simulator::initialize))
//! and every subsequent cycle ([`next_cycle`](Simulator::next_cycle)),
//! carrying latch state across cycles in a shared root [`Environment`] and
//! recording output values into traces. [`run`](Simulator::run) drives a
//! whole run to completion.

use serde::{Deserialize, Serialize};

use ripple_ir::{latch_output, Circuit, Trace};

use crate::env::Environment;
use crate::error::SimError;
use crate::evaluator::{eval_expr, EvalContext};
use crate::SimConfig;

/// The result of a completed simulation run.
///
/// Output traces are fully populated; `snapshots` holds one name-sorted
/// environment dump per cycle when snapshot recording is enabled, and is
/// empty otherwise.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimResult {
    /// The simulated circuit's name.
    pub circuit: String,
    /// The number of cycles simulated.
    pub cycles: usize,
    /// One fully-populated trace per declared output signal.
    pub outputs: Vec<Trace>,
    /// Per-cycle environment snapshots, if recording was enabled.
    pub snapshots: Vec<Vec<(String, bool)>>,
}

impl SimResult {
    /// Returns the output trace for the given signal, if any.
    pub fn output(&self, signal: &str) -> Option<&Trace> {
        self.outputs.iter().find(|t| t.signal == signal)
    }
}

/// The simulation driver for one run of one circuit.
///
/// Construct via [`Simulator::new`], then call [`run`](Simulator::run), or
/// step manually with [`initialize`](Simulator::initialize) and
/// [`next_cycle`](Simulator::next_cycle).
#[derive(Debug)]
pub struct Simulator<'a> {
    /// The circuit under simulation.
    circuit: &'a Circuit,
    /// The shared signal environment; latch outputs persist here across cycles.
    env: Environment,
    /// Output traces, one per declared output, filled one cycle at a time.
    outputs: Vec<Trace>,
    /// Collected per-cycle environment snapshots.
    snapshots: Vec<Vec<(String, bool)>>,
    /// The common input-trace length, i.e. the number of cycles.
    simlength: usize,
    /// Maximum nested function calls per evaluation.
    max_call_depth: u32,
    /// Whether to record an environment snapshot after each cycle.
    record_snapshots: bool,
}

impl<'a> Simulator<'a> {
    /// Creates a simulator for one run, validating the circuit's traces.
    ///
    /// Fails with [`SimError::MissingInputTrace`] if any declared input lacks
    /// a non-empty trace, [`SimError::TraceLengthMismatch`] if input traces
    /// disagree on length, and [`SimError::LatchOutputAssigned`] if an update
    /// equation targets a latch output signal.
    pub fn new(circuit: &'a Circuit, config: &SimConfig) -> Result<Self, SimError> {
        let mut simlength = None;
        for input in &circuit.inputs {
            let trace = circuit
                .siminput(input)
                .ok_or_else(|| SimError::MissingInputTrace {
                    signal: input.clone(),
                })?;
            if trace.is_empty() {
                return Err(SimError::MissingInputTrace {
                    signal: input.clone(),
                });
            }
            match simlength {
                None => simlength = Some(trace.len()),
                Some(expected) if trace.len() != expected => {
                    return Err(SimError::TraceLengthMismatch {
                        signal: input.clone(),
                        expected,
                        found: trace.len(),
                    });
                }
                Some(_) => {}
            }
        }
        // A circuit with no inputs has no cycles to drive.
        let simlength = simlength.unwrap_or(0);

        for latch in &circuit.latches {
            let output = latch_output(latch);
            if circuit.updates.iter().any(|u| u.target == output) {
                return Err(SimError::LatchOutputAssigned { target: output });
            }
        }

        let outputs = circuit
            .outputs
            .iter()
            .map(|o| Trace::new(o.clone(), simlength))
            .collect();

        Ok(Self {
            circuit,
            env: Environment::new(),
            outputs,
            snapshots: Vec::new(),
            simlength,
            max_call_depth: config.max_call_depth,
            record_snapshots: config.record_snapshots,
        })
    }

    /// Returns the number of cycles this run covers.
    pub fn simlength(&self) -> usize {
        self.simlength
    }

    /// Returns the current value of a signal in the root scope.
    pub fn signal_value(&self, name: &str) -> Result<bool, SimError> {
        self.env.get(Environment::ROOT, name)
    }

    /// Returns a name-sorted view of all current root-scope bindings.
    pub fn bindings(&self) -> Vec<(String, bool)> {
        self.env.bindings(Environment::ROOT)
    }

    /// Runs cycle 0: binds inputs at index 0, resets every latch output to
    /// `false`, applies every update in declared order, and records outputs.
    pub fn initialize(&mut self) -> Result<(), SimError> {
        self.bind_inputs(0)?;
        self.latches_init();
        self.apply_updates()?;
        self.record_outputs(0)?;
        self.snapshot();
        Ok(())
    }

    /// Runs cycle `t` (for `1 <= t < simlength`): binds inputs at index `t`,
    /// propagates each latch's input value from cycle `t-1` into its output
    /// signal, applies every update, and records outputs.
    pub fn next_cycle(&mut self, t: usize) -> Result<(), SimError> {
        self.bind_inputs(t)?;
        self.latches_update()?;
        self.apply_updates()?;
        self.record_outputs(t)?;
        self.snapshot();
        Ok(())
    }

    /// Drives the whole run: `initialize`, then `next_cycle` for every
    /// remaining index ascending. Any failure aborts the run with no
    /// partial result.
    pub fn run(mut self) -> Result<SimResult, SimError> {
        if self.simlength > 0 {
            self.initialize()?;
            for t in 1..self.simlength {
                self.next_cycle(t)?;
            }
        }
        Ok(SimResult {
            circuit: self.circuit.name.clone(),
            cycles: self.simlength,
            outputs: self.outputs,
            snapshots: self.snapshots,
        })
    }

    /// Binds every declared input to its trace value at the given cycle.
    fn bind_inputs(&mut self, cycle: usize) -> Result<(), SimError> {
        let circuit = self.circuit;
        for input in &circuit.inputs {
            let trace = circuit
                .siminput(input)
                .ok_or_else(|| SimError::MissingInputTrace {
                    signal: input.clone(),
                })?;
            // A hole in an input trace is as fatal as a missing trace.
            let value = trace
                .get(cycle)
                .ok_or_else(|| SimError::MissingInputTrace {
                    signal: input.clone(),
                })?;
            self.env.set(Environment::ROOT, input.clone(), value);
        }
        Ok(())
    }

    /// Resets every latch output signal to `false` (cycle 0 only).
    fn latches_init(&mut self) {
        let circuit = self.circuit;
        for latch in &circuit.latches {
            self.env.set(Environment::ROOT, latch_output(latch), false);
        }
    }

    /// Propagates each latch's current input value into its output signal,
    /// implementing the one-cycle register delay.
    fn latches_update(&mut self) -> Result<(), SimError> {
        let circuit = self.circuit;
        for latch in &circuit.latches {
            let value = self.env.get(Environment::ROOT, latch)?;
            self.env.set(Environment::ROOT, latch_output(latch), value);
        }
        Ok(())
    }

    /// Applies every update equation in declared order.
    ///
    /// Later updates see the values written by earlier ones in the same
    /// cycle; the order is never rearranged.
    fn apply_updates(&mut self) -> Result<(), SimError> {
        let circuit = self.circuit;
        let ctx = EvalContext {
            defs: &circuit.definitions,
            max_call_depth: self.max_call_depth,
        };
        for update in &circuit.updates {
            let value = eval_expr(&ctx, &mut self.env, Environment::ROOT, &update.expr)?;
            self.env.set(Environment::ROOT, update.target.clone(), value);
        }
        Ok(())
    }

    /// Records each declared output's current value at the given cycle.
    fn record_outputs(&mut self, cycle: usize) -> Result<(), SimError> {
        let circuit = self.circuit;
        for (i, output) in circuit.outputs.iter().enumerate() {
            let value = self.env.get(Environment::ROOT, output)?;
            self.outputs[i].set(cycle, value);
        }
        Ok(())
    }

    fn snapshot(&mut self) {
        if self.record_snapshots {
            self.snapshots.push(self.env.bindings(Environment::ROOT));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ripple_ir::{DefTable, Expr, Update};

    fn toggle_circuit(cycles: usize) -> Circuit {
        // One latch q driven by its own inverted output; out follows q.
        Circuit {
            name: "toggle".into(),
            inputs: vec!["tick".into()],
            outputs: vec!["out".into()],
            latches: vec!["q".into()],
            definitions: DefTable::new(),
            updates: vec![
                Update::new("q", Expr::not(Expr::signal("q'"))),
                Update::new("out", Expr::signal("q")),
            ],
            siminputs: vec![Trace::from_bits("tick", &vec![false; cycles])],
        }
    }

    #[test]
    fn toggle_oscillates() {
        let circuit = toggle_circuit(4);
        let sim = Simulator::new(&circuit, &SimConfig::default()).unwrap();
        let result = sim.run().unwrap();
        let out = result.output("out").unwrap();
        assert_eq!(out.to_string(), "1010 = out");
    }

    #[test]
    fn simulator_is_debug() {
        // `unwrap_err` on a Result<Simulator, _> needs Simulator: Debug.
        let circuit = toggle_circuit(2);
        let sim = Simulator::new(&circuit, &SimConfig::default()).unwrap();
        assert!(format!("{sim:?}").contains("Simulator"));
    }

    #[test]
    fn latch_law() {
        // q' at cycle t equals q at cycle t-1; q' is false at cycle 0.
        let circuit = toggle_circuit(5);
        let mut sim = Simulator::new(&circuit, &SimConfig::default()).unwrap();
        sim.initialize().unwrap();
        assert_eq!(sim.signal_value("q'").unwrap(), false);
        let mut prev_q = sim.signal_value("q").unwrap();
        for t in 1..sim.simlength() {
            sim.next_cycle(t).unwrap();
            assert_eq!(sim.signal_value("q'").unwrap(), prev_q);
            prev_q = sim.signal_value("q").unwrap();
        }
    }

    #[test]
    fn updates_applied_in_declared_order() {
        // b reads the value a received earlier in the same cycle.
        let circuit = Circuit {
            name: "chain".into(),
            inputs: vec!["x".into()],
            outputs: vec!["b".into()],
            latches: vec![],
            definitions: DefTable::new(),
            updates: vec![
                Update::new("a", Expr::not(Expr::signal("x"))),
                Update::new("b", Expr::signal("a")),
            ],
            siminputs: vec![Trace::from_bits("x", &[false, true])],
        };
        let result = Simulator::new(&circuit, &SimConfig::default())
            .unwrap()
            .run()
            .unwrap();
        assert_eq!(result.output("b").unwrap().to_string(), "10 = b");
    }

    #[test]
    fn missing_input_trace_fails() {
        let mut circuit = toggle_circuit(4);
        circuit.siminputs.clear();
        let err = Simulator::new(&circuit, &SimConfig::default()).unwrap_err();
        assert!(matches!(err, SimError::MissingInputTrace { signal } if signal == "tick"));
    }

    #[test]
    fn empty_input_trace_fails() {
        let mut circuit = toggle_circuit(4);
        circuit.siminputs = vec![Trace::from_bits("tick", &[])];
        let err = Simulator::new(&circuit, &SimConfig::default()).unwrap_err();
        assert!(matches!(err, SimError::MissingInputTrace { .. }));
    }

    #[test]
    fn trace_length_mismatch_fails() {
        let mut circuit = toggle_circuit(4);
        circuit.inputs.push("extra".into());
        circuit
            .siminputs
            .push(Trace::from_bits("extra", &[true, false]));
        let err = Simulator::new(&circuit, &SimConfig::default()).unwrap_err();
        assert!(matches!(
            err,
            SimError::TraceLengthMismatch {
                expected: 4,
                found: 2,
                ..
            }
        ));
    }

    #[test]
    fn latch_output_as_update_target_fails() {
        let mut circuit = toggle_circuit(4);
        circuit
            .updates
            .push(Update::new("q'", Expr::signal("tick")));
        let err = Simulator::new(&circuit, &SimConfig::default()).unwrap_err();
        assert!(matches!(err, SimError::LatchOutputAssigned { target } if target == "q'"));
    }

    #[test]
    fn undefined_signal_aborts_run() {
        let circuit = Circuit {
            name: "broken".into(),
            inputs: vec!["x".into()],
            outputs: vec!["y".into()],
            latches: vec![],
            definitions: DefTable::new(),
            updates: vec![Update::new("y", Expr::signal("ghost"))],
            siminputs: vec![Trace::from_bits("x", &[true])],
        };
        let err = Simulator::new(&circuit, &SimConfig::default())
            .unwrap()
            .run()
            .unwrap_err();
        assert!(matches!(err, SimError::UndefinedSignal { name } if name == "ghost"));
    }

    #[test]
    fn snapshots_recorded_per_cycle() {
        let circuit = toggle_circuit(3);
        let config = SimConfig {
            record_snapshots: true,
            ..SimConfig::default()
        };
        let result = Simulator::new(&circuit, &config).unwrap().run().unwrap();
        assert_eq!(result.snapshots.len(), 3);
        // Cycle 0: tick=false, q'=false, q=true, out=true.
        assert_eq!(
            result.snapshots[0],
            vec![
                ("out".to_string(), true),
                ("q".to_string(), true),
                ("q'".to_string(), false),
                ("tick".to_string(), false),
            ]
        );
    }

    #[test]
    fn snapshots_off_by_default() {
        let circuit = toggle_circuit(3);
        let result = Simulator::new(&circuit, &SimConfig::default())
            .unwrap()
            .run()
            .unwrap();
        assert!(result.snapshots.is_empty());
    }

    #[test]
    fn no_inputs_means_no_cycles() {
        let circuit = Circuit {
            name: "static".into(),
            inputs: vec![],
            outputs: vec!["y".into()],
            latches: vec![],
            definitions: DefTable::new(),
            updates: vec![],
            siminputs: vec![],
        };
        let result = Simulator::new(&circuit, &SimConfig::default())
            .unwrap()
            .run()
            .unwrap();
        assert_eq!(result.cycles, 0);
        assert!(result.output("y").unwrap().is_empty());
    }

    #[test]
    fn sim_result_serde_roundtrip() {
        let circuit = toggle_circuit(2);
        let result = Simulator::new(&circuit, &SimConfig::default())
            .unwrap()
            .run()
            .unwrap();
        let json = serde_json::to_string(&result).unwrap();
        let back: SimResult = serde_json::from_str(&json).unwrap();
        assert_eq!(result, back);
    }
}
