use std::error::Error;
use std::process::Command;

const FILE_NAME: &str = "./demos/fib.lj";

#[test]
fn interpret_fib() -> Result<(), Box<dyn Error>> {
    let output = Command::new(env!("CARGO_BIN_EXE_lj")).arg(FILE_NAME).output()?;

    assert_eq!(std::str::from_utf8(&output.stdout)?, "6765");
    assert_eq!(std::str::from_utf8(&output.stderr)?, "");
    assert!(output.status.success());

    Ok(())
}
