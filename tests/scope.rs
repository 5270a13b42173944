use std::error::Error;
use std::process::Command;

const FILE_NAME: &str = "./demos/scope.lj";

#[test]
fn interpret_scope() -> Result<(), Box<dyn Error>> {
    let output = Command::new(env!("CARGO_BIN_EXE_lj")).arg(FILE_NAME).output()?;

    assert_eq!(std::str::from_utf8(&output.stdout)?, "3");
    assert_eq!(std::str::from_utf8(&output.stderr)?, "");
    assert!(output.status.success());

    Ok(())
}
