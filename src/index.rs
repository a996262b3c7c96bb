use burn::tensor::backend::Backend;
use burn::tensor::{ElementConversion, Int, Tensor, TensorData};

use crate::{Cplx, CplxError};

/// One component of an index expression, applied to one axis.
///
/// Negative positions count from the end of the axis, as do negative slice bounds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IndexItem {
    /// Select a single position and remove the axis.
    At(isize),
    /// Select a strided range, keeping the axis.
    Slice {
        /// First position, defaults to the start (or the end for negative steps).
        start: Option<isize>,
        /// Exclusive bound, defaults to past the end (or before the start for negative steps).
        end: Option<isize>,
        /// Stride, must not be zero.
        step: isize,
    },
    /// Keep the whole axis.
    Full,
    /// Keep as many whole axes as needed so that the other items address the trailing axes.
    Ellipsis,
}

impl IndexItem {
    /// A strided slice.
    pub fn slice(start: Option<isize>, end: Option<isize>, step: isize) -> Self {
        IndexItem::Slice { start, end, step }
    }

    /// A unit stride slice over `start..end`.
    pub fn range(start: isize, end: isize) -> Self {
        IndexItem::slice(Some(start), Some(end), 1)
    }

    /// Every `step`-th position of the axis.
    pub fn step(step: isize) -> Self {
        IndexItem::slice(None, None, step)
    }
}

impl From<isize> for IndexItem {
    fn from(value: isize) -> Self {
        IndexItem::At(value)
    }
}

/// The positions a single axis keeps, resolved against its size.
enum AxisSelection {
    /// Drop the axis after keeping `position`.
    Remove(usize),
    /// Keep the axis with these positions, in order.
    Keep(Vec<usize>),
    /// Keep the axis untouched.
    All,
}

fn resolve_position(position: isize, dim: usize, size: usize) -> Result<usize, CplxError> {
    let resolved = match position < 0 {
        true => position + size as isize,
        false => position,
    };

    if resolved < 0 || resolved >= size as isize {
        return Err(CplxError::Index(format!(
            "index {position} is out of bounds for dimension {dim} with size {size}"
        )));
    }

    Ok(resolved as usize)
}

fn resolve_slice(
    start: Option<isize>,
    end: Option<isize>,
    step: isize,
    size: usize,
) -> Result<Vec<usize>, CplxError> {
    if step == 0 {
        return Err(CplxError::Value("slice step cannot be zero".to_string()));
    }

    let size = size as isize;
    let wrap = |bound: isize| match bound < 0 {
        true => bound + size,
        false => bound,
    };

    let stride = step.unsigned_abs();
    let positions = match step > 0 {
        true => {
            let start = start.map(wrap).unwrap_or(0).clamp(0, size);
            let end = end.map(wrap).unwrap_or(size).clamp(0, size);
            (start..end).step_by(stride).map(|p| p as usize).collect()
        }
        false => {
            let start = start.map(wrap).unwrap_or(size - 1).clamp(-1, size - 1);
            let end = end.map(wrap).unwrap_or(-1).clamp(-1, size - 1);
            // Walk down from `start` to just above `end`.
            ((end + 1)..=start)
                .rev()
                .step_by(stride)
                .map(|p| p as usize)
                .collect()
        }
    };

    Ok(positions)
}

fn resolve_items<const D: usize>(
    items: &[IndexItem],
    dims: [usize; D],
) -> Result<Vec<AxisSelection>, CplxError> {
    let ellipsis_count = items
        .iter()
        .filter(|item| **item == IndexItem::Ellipsis)
        .count();
    if ellipsis_count > 1 {
        return Err(CplxError::Index(
            "an index can only have a single ellipsis".to_string(),
        ));
    }

    let explicit = items.len() - ellipsis_count;
    if explicit > D {
        return Err(CplxError::Index(format!(
            "too many indices: tensor has {D} dimensions but {explicit} were indexed"
        )));
    }

    let mut selections = Vec::with_capacity(D);
    for item in items {
        let dim = selections.len();
        match *item {
            IndexItem::Ellipsis => {
                selections.extend((0..D - explicit).map(|_| AxisSelection::All));
            }
            IndexItem::Full => selections.push(AxisSelection::All),
            IndexItem::At(position) => {
                let position = resolve_position(position, dim, dims[dim])?;
                selections.push(AxisSelection::Remove(position));
            }
            IndexItem::Slice { start, end, step } => {
                let positions = resolve_slice(start, end, step, dims[dim])?;
                selections.push(AxisSelection::Keep(positions));
            }
        }
    }
    while selections.len() < D {
        selections.push(AxisSelection::All);
    }

    Ok(selections)
}

/// Dimensions of an indexing result of rank `D2`.
///
/// Burn has no rank 0 tensors: when every axis is removed the result has shape `[1]`.
fn output_dims<const D2: usize>(kept: Vec<usize>) -> Result<[usize; D2], CplxError> {
    let kept = match kept.is_empty() {
        true => vec![1],
        false => kept,
    };
    let rank = kept.len();

    kept.try_into().map_err(|_| {
        CplxError::Value(format!(
            "indexing produces a tensor of rank {rank}, but rank {D2} was requested"
        ))
    })
}

fn select_positions<B: Backend, const D: usize>(
    tensor: Tensor<B, D>,
    dim: usize,
    positions: &[usize],
) -> Tensor<B, D> {
    let contiguous = positions.windows(2).all(|pair| pair[1] == pair[0] + 1);
    if contiguous && !positions.is_empty() {
        return tensor.narrow(dim, positions[0], positions.len());
    }

    let device = tensor.device();
    let indices: Vec<B::IntElem> = positions.iter().map(|&p| (p as i64).elem()).collect();
    let indices = Tensor::<B, 1, Int>::from_data(TensorData::new(indices, [positions.len()]), &device);
    tensor.select(dim, indices)
}

impl<B: Backend, const D: usize> Cplx<B, D> {
    /// Apply an index expression to both parts.
    ///
    /// Integer items remove their axis, so `D2` must be the rank left after indexing (or 1
    /// when every axis is removed, the result then having shape `[1]`). Missing trailing
    /// items keep their axes whole.
    ///
    /// # Errors
    ///
    /// - [CplxError::Index] for out of range positions, several ellipses or too many items.
    /// - [CplxError::Value] for a zero step or a `D2` that doesn't match the result rank.
    pub fn index<const D2: usize>(&self, items: &[IndexItem]) -> Result<Cplx<B, D2>, CplxError> {
        let dims = self.dims();
        let selections = resolve_items(items, dims)?;

        let mut kept = Vec::with_capacity(D);
        for (selection, size) in selections.iter().zip(dims) {
            match selection {
                AxisSelection::Remove(_) => {}
                AxisSelection::Keep(positions) => kept.push(positions.len()),
                AxisSelection::All => kept.push(size),
            }
        }
        let output = output_dims::<D2>(kept)?;

        let (mut real, mut imag) = self.clone().into_parts();
        for (dim, selection) in selections.iter().enumerate() {
            match selection {
                AxisSelection::Remove(position) => {
                    real = real.narrow(dim, *position, 1);
                    imag = imag.narrow(dim, *position, 1);
                }
                AxisSelection::Keep(positions) => {
                    real = select_positions(real, dim, positions);
                    imag = select_positions(imag, dim, positions);
                }
                AxisSelection::All => {}
            }
        }

        Ok(Cplx::from_parts(real.reshape(output), imag.reshape(output)))
    }

    /// Select position `index` of the leading axis, negative positions counting from the end.
    ///
    /// Equivalent to `self.index::<D2>(&[IndexItem::At(index)])`.
    pub fn select<const D2: usize>(&self, index: isize) -> Result<Cplx<B, D2>, CplxError> {
        self.index(&[IndexItem::At(index)])
    }

    /// Iterate over the leading axis, in order.
    ///
    /// Each item has rank `D2 = D - 1` (1 for one dimensional tensors, the items then having
    /// shape `[1]`). The iterator holds its own handle on the tensor data, so it can be
    /// created any number of times.
    pub fn iter<const D2: usize>(&self) -> Result<CplxIter<B, D, D2>, CplxError> {
        let dims = self.dims();
        let item_dims = output_dims::<D2>(dims[1..].to_vec())?;

        Ok(CplxIter {
            tensor: self.clone(),
            item_dims,
            front: 0,
            back: dims[0],
        })
    }

    /// Iterate over the leading axis, last position first.
    pub fn reversed<const D2: usize>(
        &self,
    ) -> Result<core::iter::Rev<CplxIter<B, D, D2>>, CplxError> {
        Ok(self.iter()?.rev())
    }
}

/// An iterator over the leading axis of a [Cplx], created by [Cplx::iter].
pub struct CplxIter<B: Backend, const D: usize, const D2: usize> {
    tensor: Cplx<B, D>,
    item_dims: [usize; D2],
    front: usize,
    back: usize,
}

impl<B: Backend, const D: usize, const D2: usize> CplxIter<B, D, D2> {
    fn item(&self, position: usize) -> Cplx<B, D2> {
        let (real, imag) = self.tensor.clone().into_parts();
        Cplx::from_parts(
            real.narrow(0, position, 1).reshape(self.item_dims),
            imag.narrow(0, position, 1).reshape(self.item_dims),
        )
    }
}

impl<B: Backend, const D: usize, const D2: usize> Iterator for CplxIter<B, D, D2> {
    type Item = Cplx<B, D2>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.front >= self.back {
            return None;
        }
        let item = self.item(self.front);
        self.front += 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.back - self.front;
        (remaining, Some(remaining))
    }
}

impl<B: Backend, const D: usize, const D2: usize> DoubleEndedIterator for CplxIter<B, D, D2> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.front >= self.back {
            return None;
        }
        self.back -= 1;
        Some(self.item(self.back))
    }
}

impl<B: Backend, const D: usize, const D2: usize> ExactSizeIterator for CplxIter<B, D, D2> {}
