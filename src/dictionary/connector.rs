//! Connection costs between adjacent morphemes.

use std::io::{BufRead, BufReader, Read};

use crate::dictionary::lexicon::parse_field;
use crate::error::{Result, ShikiriError};

/// Dense `num_right x num_left` cost matrix read from `matrix.def`.
#[derive(Debug, Clone)]
pub struct ConnectionMatrix {
    num_right: usize,
    num_left: usize,
    costs: Vec<i16>,
}

impl ConnectionMatrix {
    /// A matrix with every cost set to zero.
    pub fn new(num_right: usize, num_left: usize) -> Self {
        Self {
            num_right,
            num_left,
            costs: vec![0; num_right * num_left],
        }
    }

    /// Parse a header line `num_right num_left` followed by
    /// `right_id left_id cost` lines. Pairs that are not listed cost 0.
    pub fn from_reader<R: Read>(rdr: R) -> Result<Self> {
        let mut lines = BufReader::new(rdr)
            .lines()
            .enumerate()
            .map(|(i, line)| (i + 1, line));

        let (num_right, num_left) = loop {
            let Some((line_no, line)) = lines.next() else {
                return Err(ShikiriError::dictionary_load("matrix: missing header"));
            };
            let line = line.map_err(|e| ShikiriError::dictionary_load(format!("matrix: {e}")))?;
            if line.trim().is_empty() {
                continue;
            }
            let cols: Vec<&str> = line.split_whitespace().collect();
            if cols.len() != 2 {
                return Err(ShikiriError::dictionary_load(format!(
                    "matrix:{line_no}: header must be 'num_right num_left'"
                )));
            }
            break (
                parse_field::<usize>(cols[0], "num_right", line_no)?,
                parse_field::<usize>(cols[1], "num_left", line_no)?,
            );
        };

        if num_right == 0 || num_left == 0 {
            return Err(ShikiriError::dictionary_load(
                "matrix: dimensions must be at least 1x1",
            ));
        }

        let mut matrix = Self::new(num_right, num_left);
        for (line_no, line) in lines {
            let line = line.map_err(|e| ShikiriError::dictionary_load(format!("matrix: {e}")))?;
            if line.trim().is_empty() {
                continue;
            }
            let cols: Vec<&str> = line.split_whitespace().collect();
            if cols.len() != 3 {
                return Err(ShikiriError::dictionary_load(format!(
                    "matrix:{line_no}: expected 'right_id left_id cost'"
                )));
            }
            let right_id: u16 = parse_field(cols[0], "right_id", line_no)?;
            let left_id: u16 = parse_field(cols[1], "left_id", line_no)?;
            let cost: i16 = parse_field(cols[2], "cost", line_no)?;
            matrix
                .check_ids(right_id, left_id)
                .map_err(|e| ShikiriError::dictionary_load(format!("matrix:{line_no}: {e}")))?;
            matrix.set(right_id, left_id, cost);
        }

        Ok(matrix)
    }

    /// Verify that a right/left id pair addresses a cell of this matrix.
    pub fn check_ids(&self, right_id: u16, left_id: u16) -> std::result::Result<(), String> {
        if usize::from(right_id) >= self.num_right {
            return Err(format!(
                "right_id {right_id} out of range (matrix has {})",
                self.num_right
            ));
        }
        if usize::from(left_id) >= self.num_left {
            return Err(format!(
                "left_id {left_id} out of range (matrix has {})",
                self.num_left
            ));
        }
        Ok(())
    }

    /// Panics if the ids are out of range; callers check with [`Self::check_ids`].
    pub fn set(&mut self, right_id: u16, left_id: u16, cost: i16) {
        let idx = self.index(right_id, left_id);
        self.costs[idx] = cost;
    }

    /// Out-of-range ids cost 0.
    #[inline(always)]
    pub fn cost(&self, right_id: u16, left_id: u16) -> i32 {
        if usize::from(right_id) >= self.num_right || usize::from(left_id) >= self.num_left {
            return 0;
        }
        i32::from(self.costs[self.index(right_id, left_id)])
    }

    #[inline(always)]
    fn index(&self, right_id: u16, left_id: u16) -> usize {
        usize::from(right_id) * self.num_left + usize::from(left_id)
    }

    pub fn num_right(&self) -> usize {
        self.num_right
    }

    pub fn num_left(&self) -> usize {
        self.num_left
    }
}
