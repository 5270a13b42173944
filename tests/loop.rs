use std::error::Error;
use std::process::Command;

const FILE_NAME: &str = "./demos/loop.lj";

#[test]
fn interpret_loop() -> Result<(), Box<dyn Error>> {
    let output = Command::new(env!("CARGO_BIN_EXE_lj")).arg(FILE_NAME).output()?;

    assert_eq!(std::str::from_utf8(&output.stdout)?, "0123456789");
    assert_eq!(std::str::from_utf8(&output.stderr)?, "");
    assert!(output.status.success());

    Ok(())
}
