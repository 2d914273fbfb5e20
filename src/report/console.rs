use std::io::{self, Write};

use crate::parse::Inspection;

/// One `label value` line per field, a blank line after every inspection.
pub fn write_inspections(out: &mut impl Write, inspections: &[Inspection]) -> io::Result<()> {
    for inspection in inspections {
        for (label, value) in inspection.fields() {
            writeln!(out, "{label}{value}")?;
        }
        writeln!(out)?;
    }
    Ok(())
}

pub fn print_inspections(inspections: &[Inspection]) -> io::Result<()> {
    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());
    write_inspections(&mut out, inspections)?;
    out.flush()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse::Address;

    #[test]
    fn test_write_inspections() {
        let inspection = Inspection {
            facility_name: "OXBOW TACO STAND".into(),
            inspection_date: "02/10/2017".into(),
            address: Address {
                street: "610 1st St".into(),
                city: "Napa".into(),
                state: "CA".into(),
                zip: "94559".into(),
            },
            inspection_type: "ROUTINE INSPECTION".into(),
            grade: 'B',
            violations: "6. Adequate handwashing facilities supplied & accessible".into(),
        };
        let mut out = Vec::new();
        write_inspections(&mut out, &[inspection.clone(), inspection]).unwrap();
        let block = "Facility Name: OXBOW TACO STAND\n\
                     Inspection Date: 02/10/2017\n\
                     Street Address: 610 1st St\n\
                     City: Napa\n\
                     State: CA\n\
                     Zipcode: 94559\n\
                     Inspection Type: ROUTINE INSPECTION\n\
                     Inspection Grade: B\n\
                     Out of Compliance Violations: 6. Adequate handwashing facilities supplied & accessible\n\
                     \n";
        assert_eq!(String::from_utf8(out).unwrap(), block.repeat(2));
    }

    #[test]
    fn test_nothing_to_print() {
        let mut out = Vec::new();
        write_inspections(&mut out, &[]).unwrap();
        assert!(out.is_empty());
    }
}
