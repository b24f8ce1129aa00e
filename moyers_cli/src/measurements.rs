//! Collecting measurements from flags and interactive prompts.

use std::io::{BufRead, Write};

use anyhow::Context;
use moyers_core::{parse_measurement, ArchType, CalcError, MeasurementInput};
use tracing::warn;

/// One measurement the analysis needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    IncisorSum,
    SpaceAvailable,
    CurrentOverjet,
    TargetOverjet,
}

impl Field {
    /// Fields asked for, in prompt order
    pub fn for_arch(arch: ArchType) -> &'static [Field] {
        if arch.uses_overjet() {
            &[Field::IncisorSum, Field::SpaceAvailable, Field::CurrentOverjet, Field::TargetOverjet]
        } else {
            &[Field::IncisorSum, Field::SpaceAvailable]
        }
    }

    /// Name used in `MeasurementInput` and in error reports
    pub fn key(&self) -> &'static str {
        match self {
            Field::IncisorSum => "incisor_sum_mm",
            Field::SpaceAvailable => "space_available_mm",
            Field::CurrentOverjet => "current_overjet_mm",
            Field::TargetOverjet => "target_overjet_mm",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Field::IncisorSum => "Mandibular incisors sum (mm)",
            Field::SpaceAvailable => "Space available (mm)",
            Field::CurrentOverjet => "Current overjet (mm)",
            Field::TargetOverjet => "Target overjet (mm)",
        }
    }

    /// Store `value` in the matching slot of `input`
    pub fn assign(&self, input: &mut MeasurementInput, value: f64) {
        match self {
            Field::IncisorSum => input.incisor_sum_mm = value,
            Field::SpaceAvailable => input.space_available_mm = value,
            Field::CurrentOverjet => input.current_overjet_mm = value,
            Field::TargetOverjet => input.target_overjet_mm = value,
        }
    }

    /// Pre-filled value offered at the prompt
    pub fn default_value(&self, arch: ArchType) -> f64 {
        match (self, arch) {
            (Field::IncisorSum, _) => 22.0,
            (Field::SpaceAvailable, ArchType::Lower) => 25.0,
            (Field::SpaceAvailable, ArchType::Upper) => 32.0,
            (Field::CurrentOverjet, _) => 3.0,
            (Field::TargetOverjet, _) => 2.0,
        }
    }
}

/// Raw flag values, before parsing
#[derive(Debug, Clone, Default)]
pub struct MeasurementFlags {
    pub incisor_sum: Option<String>,
    pub space_available: Option<String>,
    pub current_overjet: Option<String>,
    pub target_overjet: Option<String>,
}

impl MeasurementFlags {
    pub fn get(&self, field: Field) -> Option<&str> {
        match field {
            Field::IncisorSum => self.incisor_sum.as_deref(),
            Field::SpaceAvailable => self.space_available.as_deref(),
            Field::CurrentOverjet => self.current_overjet.as_deref(),
            Field::TargetOverjet => self.target_overjet.as_deref(),
        }
    }
}

/// Reads measurements, prompting on `prompts` for anything not given as a flag.
pub struct Collector<R, W> {
    reader: R,
    prompts: W,
    interactive: bool,
}

impl<R: BufRead, W: Write> Collector<R, W> {
    pub fn new(reader: R, prompts: W, interactive: bool) -> Self {
        Self {
            reader,
            prompts,
            interactive,
        }
    }

    /// Collect measurements and run the analysis.
    ///
    /// When interactive, a value the analysis rejects is asked for again,
    /// provided it was prompted for. Only the rejected field is re-entered.
    /// Rejected flag values end the run.
    pub fn analyze(&mut self, arch: ArchType, flags: &MeasurementFlags) -> anyhow::Result<moyers_core::AnalysisResult> {
        let mut input = self.collect(arch, flags)?;
        loop {
            let error = match arch.analyze(&input) {
                Ok(result) => return Ok(result),
                Err(error) => error,
            };
            let field = Field::for_arch(arch)
                .iter()
                .copied()
                .find(|field| field.key() == error.field());
            match field {
                Some(field) if self.interactive && flags.get(field).is_none() => {
                    warn!(field = error.field(), code = error.error_code(), "measurement rejected");
                    writeln!(self.prompts, "{}", error.user_message())?;
                    let value = self.value(arch, field, None)?;
                    field.assign(&mut input, value);
                }
                _ => return Err(error.into()),
            }
        }
    }

    /// Gather one full set of measurements for the arch.
    pub fn collect(&mut self, arch: ArchType, flags: &MeasurementFlags) -> anyhow::Result<MeasurementInput> {
        let mut values = [0.0; 4];
        for (slot, field) in values.iter_mut().zip(Field::for_arch(arch)) {
            *slot = self.value(arch, *field, flags.get(*field))?;
        }
        let [incisor_sum, space_available, current_overjet, target_overjet] = values;
        Ok(match arch {
            ArchType::Lower => MeasurementInput::lower(incisor_sum, space_available),
            ArchType::Upper => MeasurementInput::upper(incisor_sum, space_available, current_overjet, target_overjet),
        })
    }

    fn value(&mut self, arch: ArchType, field: Field, flag: Option<&str>) -> anyhow::Result<f64> {
        if let Some(raw) = flag {
            return Ok(parse_measurement(field.key(), raw)?);
        }
        let default = field.default_value(arch);
        if !self.interactive {
            return Ok(default);
        }

        loop {
            write!(self.prompts, "{} [{:.1}]: ", field.label(), default)?;
            self.prompts.flush()?;

            let mut line = String::new();
            let read = self
                .reader
                .read_line(&mut line)
                .context("failed to read measurement")?;
            // End of input takes the default
            if read == 0 || line.trim().is_empty() {
                return Ok(default);
            }

            match parse_measurement(field.key(), &line) {
                Ok(value) => return Ok(value),
                Err(error @ CalcError::Parse { .. }) => {
                    warn!(field = field.key(), "not a number, asking again");
                    writeln!(self.prompts, "{}", error.user_message())?;
                }
                Err(error) => return Err(error.into()),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn collector(input: &str) -> Collector<Cursor<Vec<u8>>, Vec<u8>> {
        Collector::new(Cursor::new(input.as_bytes().to_vec()), Vec::new(), true)
    }

    #[test]
    fn test_flags_skip_prompts() {
        let flags = MeasurementFlags {
            incisor_sum: Some("23".to_string()),
            space_available: Some("24.5".to_string()),
            ..Default::default()
        };
        let mut c = collector("");
        let input = c.collect(ArchType::Lower, &flags).unwrap();
        assert_eq!(input, MeasurementInput::lower(23.0, 24.5));
        assert!(c.prompts.is_empty());
    }

    #[test]
    fn test_empty_answers_take_defaults() {
        let mut c = collector("\n\n\n\n");
        let input = c.collect(ArchType::Upper, &MeasurementFlags::default()).unwrap();
        assert_eq!(input, MeasurementInput::upper(22.0, 32.0, 3.0, 2.0));
        let prompts = String::from_utf8(c.prompts).unwrap();
        assert!(prompts.contains("Target overjet (mm) [2.0]: "));
    }

    #[test]
    fn test_non_interactive_uses_defaults() {
        let mut c = Collector::new(Cursor::new(Vec::new()), Vec::new(), false);
        let input = c.collect(ArchType::Lower, &MeasurementFlags::default()).unwrap();
        assert_eq!(input, MeasurementInput::lower(22.0, 25.0));
        assert!(c.prompts.is_empty());
    }

    #[test]
    fn test_bad_number_is_asked_again() {
        let mut c = collector("abc\n21.5\n26\n");
        let input = c.collect(ArchType::Lower, &MeasurementFlags::default()).unwrap();
        assert_eq!(input, MeasurementInput::lower(21.5, 26.0));
        let prompts = String::from_utf8(c.prompts).unwrap();
        assert!(prompts.contains("Please enter valid numerical values"));
    }

    #[test]
    fn test_bad_flag_is_parse_error() {
        let flags = MeasurementFlags {
            incisor_sum: Some("twenty".to_string()),
            ..Default::default()
        };
        let err = collector("").collect(ArchType::Lower, &flags).unwrap_err();
        let calc = err.downcast_ref::<CalcError>().unwrap();
        assert_eq!(calc.error_code(), "PARSE_ERROR");
    }

    #[test]
    fn test_rejected_prompt_value_is_reentered() {
        // 35 mm is out of range; only the incisor sum is asked for again
        let mut c = collector("35\n25\n22\n");
        let result = c.analyze(ArchType::Lower, &MeasurementFlags::default()).unwrap();
        assert!((result.discrepancy_mm - 7.4).abs() < 1e-9);
        let prompts = String::from_utf8(c.prompts).unwrap();
        assert!(prompts.contains("Sum of mandibular incisors should be between 20-30mm"));
        assert_eq!(prompts.matches("Mandibular incisors sum (mm)").count(), 2);
        assert_eq!(prompts.matches("Space available (mm)").count(), 1);
    }

    #[test]
    fn test_rejected_overjet_keeps_other_answers() {
        let mut c = collector("23\n30\n-1\n2.5\n4\n");
        let result = c.analyze(ArchType::Upper, &MeasurementFlags::default()).unwrap();
        assert_eq!(result.input, MeasurementInput::upper(23.0, 30.0, 4.0, 2.5));
        let prompts = String::from_utf8(c.prompts).unwrap();
        assert!(prompts.contains("Overjet values must be positive"));
        assert_eq!(prompts.matches("Mandibular incisors sum (mm)").count(), 1);
        assert_eq!(prompts.matches("Target overjet (mm)").count(), 1);
        assert_eq!(prompts.matches("Current overjet (mm)").count(), 2);
    }

    #[test]
    fn test_field_assign() {
        let mut input = MeasurementInput::upper(22.0, 32.0, 3.0, 2.0);
        Field::SpaceAvailable.assign(&mut input, 28.0);
        Field::TargetOverjet.assign(&mut input, 1.0);
        assert_eq!(input, MeasurementInput::upper(22.0, 28.0, 3.0, 1.0));
    }

    #[test]
    fn test_rejected_flag_value_ends_run() {
        let flags = MeasurementFlags {
            space_available: Some("0".to_string()),
            ..Default::default()
        };
        let err = collector("\n").analyze(ArchType::Lower, &flags).unwrap_err();
        let calc = err.downcast_ref::<CalcError>().unwrap();
        assert_eq!(calc.error_code(), "INVALID_VALUE");
    }
}
