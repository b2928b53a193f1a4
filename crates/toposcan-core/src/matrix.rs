//! Integer intersection forms and their text rendering.

use std::fmt;

use nalgebra::DMatrix;

/// A symmetric integer matrix of pairwise curve intersection numbers.
pub type IntersectionForm = DMatrix<i64>;

/// Returns the explicit 0x0 form.
pub fn empty_form() -> IntersectionForm {
    DMatrix::zeros(0, 0)
}

/// Places every form on the diagonal of one zero matrix, in order.
///
/// Empty forms contribute nothing. The result is 0x0 when every input is empty.
pub fn block_diagonal<'a, I>(forms: I) -> IntersectionForm
where
    I: IntoIterator<Item = &'a IntersectionForm>,
{
    let forms: Vec<&IntersectionForm> = forms.into_iter().collect();
    let total: usize = forms.iter().map(|m| m.nrows()).sum();
    let mut out = DMatrix::zeros(total, total);
    let mut offset = 0;
    for form in forms {
        let n = form.nrows();
        if n == 0 {
            continue;
        }
        out.view_mut((offset, offset), (n, n)).copy_from(form);
        offset += n;
    }
    out
}

/// Returns true when `m` equals its transpose.
pub fn is_symmetric(m: &IntersectionForm) -> bool {
    m.nrows() == m.ncols() && *m == m.transpose()
}

/// Appends `m` as whitespace-separated integer rows followed by a blank line.
///
/// An empty matrix appends nothing.
pub fn write_matrix_rows(buf: &mut String, m: &IntersectionForm) {
    if m.nrows() == 0 || m.ncols() == 0 {
        return;
    }
    for i in 0..m.nrows() {
        for j in 0..m.ncols() {
            if j > 0 {
                buf.push(' ');
            }
            buf.push_str(&m[(i, j)].to_string());
        }
        buf.push('\n');
    }
    buf.push('\n');
}

/// Display adapter that never panics on 0x0 forms.
pub struct FormDisplay<'a>(pub &'a IntersectionForm);

impl fmt::Display for FormDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let m = self.0;
        if m.nrows() == 0 || m.ncols() == 0 {
            return writeln!(f, "[empty 0x0 matrix]");
        }
        let width = m.iter().map(|v| v.to_string().len()).max().unwrap_or(1);
        for i in 0..m.nrows() {
            for j in 0..m.ncols() {
                if j > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{:>width$}", m[(i, j)], width = width)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
