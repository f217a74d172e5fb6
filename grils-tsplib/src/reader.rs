#[cfg(test)]
#[path = "../tests/unit/reader_test.rs"]
mod reader_test;

use grils_core::models::Instance;
use grils_core::utils::{GenericError, GenericResult};
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

/// Reads an instance from a file path.
pub fn read_instance_from_path(path: &Path, neighbors_num: usize) -> GenericResult<Instance> {
    let file = File::open(path).map_err(|err| GenericError::from(format!("cannot open '{}': {err}", path.display())))?;
    read_instance(BufReader::new(file), neighbors_num)
}

/// Reads an instance in the TSPLIB "X" format:
///
/// ```text
/// NAME : <name>
/// COMMENT : <free text>
/// TYPE : CVRP
/// DIMENSION : <n>
/// EDGE_WEIGHT_TYPE : EUC_2D
/// CAPACITY : <q>
/// NODE_COORD_SECTION
/// <id> <x> <y>          (n rows)
/// DEMAND_SECTION
/// <id> <demand>         (n rows)
/// ```
///
/// The first row of each section is the depot. Any depot section at the end
/// of the file is ignored.
pub fn read_instance<R: Read>(reader: BufReader<R>, neighbors_num: usize) -> GenericResult<Instance> {
    let mut lines = reader.lines();

    let mut next_line = || -> GenericResult<String> {
        lines.next().unwrap_or_else(|| Err(std::io::Error::from(std::io::ErrorKind::UnexpectedEof)))
            .map_err(GenericError::from)
    };

    let header_value = |line: &str, key: &str| -> GenericResult<String> {
        let (name, value) = line.split_once(':').ok_or_else(|| format!("cannot parse '{line}'"))?;
        if name.trim() != key {
            return Err(format!("expected '{key}', got '{line}'").into());
        }
        Ok(value.trim().to_string())
    };

    header_value(&next_line()?, "NAME")?;
    header_value(&next_line()?, "COMMENT")?;
    header_value(&next_line()?, "TYPE")?;
    let dimension: usize = header_value(&next_line()?, "DIMENSION")?.parse()?;
    header_value(&next_line()?, "EDGE_WEIGHT_TYPE")?;
    let capacity: i32 = header_value(&next_line()?, "CAPACITY")?.parse()?;

    if dimension < 2 {
        return Err(format!("the instance needs a depot and at least one customer, got {dimension} rows").into());
    }

    if next_line()?.trim() != "NODE_COORD_SECTION" {
        return Err("expected NODE_COORD_SECTION".into());
    }

    let mut xcoords = Vec::with_capacity(dimension);
    let mut ycoords = Vec::with_capacity(dimension);
    for _ in 0..dimension {
        let line = next_line()?;
        let mut fields = line.split_whitespace();
        let _id = fields.next().ok_or_else(|| format!("cannot parse coordinate row '{line}'"))?;
        let x: f64 = fields.next().ok_or_else(|| format!("missing x coordinate in '{line}'"))?.parse()?;
        let y: f64 = fields.next().ok_or_else(|| format!("missing y coordinate in '{line}'"))?.parse()?;
        xcoords.push(x);
        ycoords.push(y);
    }

    if next_line()?.trim() != "DEMAND_SECTION" {
        return Err("expected DEMAND_SECTION".into());
    }

    let mut demands = Vec::with_capacity(dimension);
    for _ in 0..dimension {
        let line = next_line()?;
        let mut fields = line.split_whitespace();
        let _id = fields.next().ok_or_else(|| format!("cannot parse demand row '{line}'"))?;
        let demand: i32 = fields.next().ok_or_else(|| format!("missing demand in '{line}'"))?.parse()?;
        demands.push(demand);
    }

    // The depot carries no demand by definition; the remainder of the file
    // (depot section, EOF marker) is ignored.
    demands[0] = 0;

    Ok(Instance::new(capacity, xcoords, ycoords, demands, neighbors_num))
}
