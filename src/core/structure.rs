use crate::domain::model::{round2, ResidueConfidence};
use crate::utils::error::{FoldError, Result};

/// PDB ATOM 紀錄中本工具需要的欄位。ESMFold 把 pLDDT 寫在
/// temperature factor 欄（第 61-66 欄）。
#[derive(Debug, Clone, PartialEq)]
pub struct PdbAtom {
    pub serial: i32,
    pub name: String,
    pub residue_name: String,
    pub chain: char,
    pub residue_index: i32,
    pub b_factor: f64,
}

/// 解析座標文字中的 ATOM / HETATM 紀錄（固定欄位格式）
pub fn parse_atoms(pdb_text: &str) -> Result<Vec<PdbAtom>> {
    let mut atoms = Vec::new();

    for (line_number, line) in pdb_text.lines().enumerate() {
        if !(line.starts_with("ATOM") || line.starts_with("HETATM")) {
            continue;
        }

        let atom = parse_atom_line(line).map_err(|e| FoldError::ParseError {
            message: format!("line {}: {}", line_number + 1, e),
        })?;
        atoms.push(atom);
    }

    if atoms.is_empty() {
        return Err(FoldError::ParseError {
            message: "no ATOM records found in coordinate text".to_string(),
        });
    }

    Ok(atoms)
}

fn parse_atom_line(line: &str) -> std::result::Result<PdbAtom, String> {
    let serial = column(line, 6, 11)?
        .parse::<i32>()
        .map_err(|_| "atom serial is not a number".to_string())?;
    let name = column(line, 12, 16)?.to_string();
    let residue_name = column(line, 17, 20)?.to_string();
    let chain = column(line, 21, 22)?.chars().next().unwrap_or(' ');
    let residue_index = column(line, 22, 26)?
        .parse::<i32>()
        .map_err(|_| "residue sequence number is not a number".to_string())?;
    let b_factor = column(line, 60, 66)?
        .parse::<f64>()
        .map_err(|_| "temperature factor is not a number".to_string())?;

    Ok(PdbAtom {
        serial,
        name,
        residue_name,
        chain,
        residue_index,
        b_factor,
    })
}

fn column(line: &str, start: usize, end: usize) -> std::result::Result<&str, String> {
    line.get(start..end)
        .map(str::trim)
        .ok_or_else(|| format!("record truncated before column {}", end))
}

/// 所有原子 b-factor 的算術平均，對應原工具的 struct.b_factor.mean()
pub fn mean_plddt(atoms: &[PdbAtom]) -> f64 {
    if atoms.is_empty() {
        return 0.0;
    }
    let sum: f64 = atoms.iter().map(|a| a.b_factor).sum();
    round2(sum / atoms.len() as f64)
}

/// 依（鏈、殘基序號）分組，得到每個殘基一筆信心值
pub fn residue_confidences(atoms: &[PdbAtom]) -> Vec<ResidueConfidence> {
    let mut residues: Vec<ResidueConfidence> = Vec::new();
    let mut current: Option<(char, i32, String, f64, usize)> = None;

    for atom in atoms {
        match current.as_mut() {
            Some((chain, index, _, sum, count))
                if *chain == atom.chain && *index == atom.residue_index =>
            {
                *sum += atom.b_factor;
                *count += 1;
            }
            _ => {
                if let Some((chain, index, name, sum, count)) = current.take() {
                    residues.push(ResidueConfidence {
                        chain,
                        residue_index: index,
                        residue_name: name,
                        plddt: round2(sum / count as f64),
                    });
                }
                current = Some((
                    atom.chain,
                    atom.residue_index,
                    atom.residue_name.clone(),
                    atom.b_factor,
                    1,
                ));
            }
        }
    }

    if let Some((chain, index, name, sum, count)) = current {
        residues.push(ResidueConfidence {
            chain,
            residue_index: index,
            residue_name: name,
            plddt: round2(sum / count as f64),
        });
    }

    residues
}
