use std::ops::Index;
use std::sync::Arc;

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::line::{CodeLine, LineId};


/// Ordered sequence of [`CodeLine`]s in visual line order.
///
/// Lines are shared: cloning a `CodeData` hands out another view of the same
/// allocation, so a snapshot preserves both order and identity of every line.
/// The sequence is immutable; hosts replace it wholesale.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(from = "Vec<CodeLine>", into = "Vec<CodeLine>")]
pub struct CodeData {
	lines: Arc<[CodeLine]>,
}

impl CodeData {
	pub fn new(lines: Vec<CodeLine>) -> Self {
		Self {
			lines: lines.into(),
		}
	}

	/// Splits source text into lines with sequential integer ids starting at 1.
	pub fn from_text(text: &str) -> Self {
		text.lines()
			.enumerate()
			.map(|(idx, content)| CodeLine::new(idx as i64 + 1, content))
			.collect()
	}

	pub fn lines(&self) -> &[CodeLine] {
		&self.lines
	}

	pub fn iter(&self) -> std::slice::Iter<'_, CodeLine> {
		self.lines.iter()
	}

	pub fn len(&self) -> usize {
		self.lines.len()
	}

	pub fn is_empty(&self) -> bool {
		self.lines.is_empty()
	}

	pub fn get(&self, idx: usize) -> Option<&CodeLine> {
		self.lines.get(idx)
	}

	/// Position of the first line carrying `id`.
	pub fn position(&self, id: &LineId) -> Option<usize> {
		self.lines.iter().position(|line| &line.id == id)
	}

	/// Returns true when both values view the same line allocation.
	pub fn ptr_eq(&self, other: &CodeData) -> bool {
		Arc::ptr_eq(&self.lines, &other.lines)
	}

	/// Ids appearing more than once, in first-repeat order.
	///
	/// Diagnostic only; nothing in the core calls this implicitly.
	pub fn duplicate_ids(&self) -> Vec<&LineId> {
		let mut seen = FxHashSet::default();
		let mut reported = FxHashSet::default();
		self.lines
			.iter()
			.filter(|line| !seen.insert(&line.id) && reported.insert(&line.id))
			.map(|line| &line.id)
			.collect()
	}
}

impl Default for CodeData {
	fn default() -> Self {
		Self::new(Vec::new())
	}
}

impl PartialEq for CodeData {
	fn eq(&self, other: &Self) -> bool {
		self.ptr_eq(other) || self.lines == other.lines
	}
}

impl Index<usize> for CodeData {
	type Output = CodeLine;

	fn index(&self, idx: usize) -> &CodeLine {
		&self.lines[idx]
	}
}

impl From<Vec<CodeLine>> for CodeData {
	fn from(lines: Vec<CodeLine>) -> Self {
		Self::new(lines)
	}
}

impl From<CodeData> for Vec<CodeLine> {
	fn from(data: CodeData) -> Self {
		data.lines.to_vec()
	}
}

impl FromIterator<CodeLine> for CodeData {
	fn from_iter<I: IntoIterator<Item = CodeLine>>(iter: I) -> Self {
		Self::new(iter.into_iter().collect())
	}
}

impl<'a> IntoIterator for &'a CodeData {
	type Item = &'a CodeLine;
	type IntoIter = std::slice::Iter<'a, CodeLine>;

	fn into_iter(self) -> Self::IntoIter {
		self.iter()
	}
}
