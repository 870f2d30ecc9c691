//! Shared harness for the integration tests.

#![allow(dead_code)]

use okerew::{BufferedConsole, Interpreter, InterpreterConfig, OkerewError, Value};

/// Result of running a script against a buffered console.
pub struct Run {
    pub interpreter: Interpreter,
    pub output: Vec<String>,
    pub prompts: Vec<String>,
}

impl Run {
    pub fn var(&self, name: &str) -> Option<&Value> {
        self.interpreter.variable(name)
    }
}

/// Runs `source`, feeding `inputs` to `input` statements.
///
/// Panics on a fatal error; use [`run_err`] to inspect one.
pub fn run_with_inputs(source: &str, inputs: &[&str]) -> Run {
    let mut interpreter = Interpreter::default();
    let mut console = BufferedConsole::with_inputs(inputs.iter().copied());

    if let Err(err) = interpreter.run_source(source, &mut console) {
        panic!("script failed: {} ({})\n{}", err, err.code(), source);
    }

    Run {
        interpreter,
        output: console.output,
        prompts: console.prompts,
    }
}

pub fn run(source: &str) -> Run {
    run_with_inputs(source, &[])
}

/// Runs `source` expecting a fatal error; also returns any output
/// produced before it.
pub fn run_err(source: &str) -> (OkerewError, Vec<String>) {
    run_err_with_config(source, InterpreterConfig::default())
}

pub fn run_err_with_config(source: &str, config: InterpreterConfig) -> (OkerewError, Vec<String>) {
    let mut interpreter = Interpreter::new(config);
    let mut console = BufferedConsole::new();

    match interpreter.run_source(source, &mut console) {
        Ok(signal) => panic!("expected a fatal error, finished with {:?}", signal),
        Err(err) => (err, console.output),
    }
}
