//! Python bindings for the whichimg known-image lookup library.
//!
//! Images are numpy `uint8` arrays shaped `(height, width)` or
//! `(height, width, channels)` with one or three channels, as returned by
//! OpenCV or Pillow. Channel order is kept as given.

use std::collections::HashMap;

use numpy::{PyReadonlyArrayDyn, PyUntypedArrayMethods};
use pyo3::exceptions::{PyRuntimeError, PyValueError};
use pyo3::prelude::*;

use whichimg::{
    ColorImage, ImageTeller as RustImageTeller, ImageView, TellConfig, WhichImgError,
};

/// Convert a WhichImgError to a Python exception.
fn to_py_err(err: WhichImgError) -> PyErr {
    match err {
        WhichImgError::TooFewImages { .. } | WhichImgError::Indistinguishable { .. } => {
            PyValueError::new_err(err.to_string())
        }
        _ => PyRuntimeError::new_err(err.to_string()),
    }
}

fn view_of<'a>(array: &'a PyReadonlyArrayDyn<'_, u8>) -> PyResult<ImageView<'a>> {
    let shape = array.shape();
    let (height, width, channels) = match *shape {
        [height, width] => (height, width, 1),
        [height, width, channels] => (height, width, channels),
        _ => {
            return Err(PyValueError::new_err(
                "image must have shape (height, width) or (height, width, channels)",
            ))
        }
    };
    let data = array.as_slice()?;
    ImageView::from_slice(data, width, height, channels).map_err(to_py_err)
}

/// Identifies which of a fixed list of known images a query image is.
///
/// Building analyzes the differences between the known images once; keep
/// the instance around and call `tell` as often as needed.
#[pyclass]
pub struct ImageTeller {
    inner: RustImageTeller,
}

#[pymethods]
impl ImageTeller {
    /// Build a teller from known images.
    ///
    /// Args:
    ///     images: list of uint8 numpy arrays (at least two)
    ///     surprises: confirm answers with a full comparison so unknown
    ///         images yield -1 (default: True)
    ///     parallel: build discrimination chains on all cores (default: False)
    #[new]
    #[pyo3(signature = (images, surprises = true, parallel = false))]
    fn new(
        images: Vec<PyReadonlyArrayDyn<'_, u8>>,
        surprises: bool,
        parallel: bool,
    ) -> PyResult<Self> {
        let mut owned = Vec::with_capacity(images.len());
        for array in &images {
            owned.push(ColorImage::from_view(view_of(array)?).map_err(to_py_err)?);
        }
        let cfg = TellConfig {
            surprises,
            parallel,
        };
        let inner = RustImageTeller::build(owned, cfg).map_err(to_py_err)?;
        Ok(Self { inner })
    }

    /// Build a teller from image files.
    #[staticmethod]
    #[pyo3(signature = (paths, surprises = true))]
    fn from_files(paths: Vec<String>, surprises: bool) -> PyResult<Self> {
        let owned = paths
            .iter()
            .map(whichimg::io::load_color_image)
            .collect::<Result<Vec<_>, _>>()
            .map_err(to_py_err)?;
        let cfg = TellConfig {
            surprises,
            ..TellConfig::default()
        };
        let inner = RustImageTeller::build(owned, cfg).map_err(to_py_err)?;
        Ok(Self { inner })
    }

    /// Return the index of the known image equal to `image`, or -1.
    fn tell(&self, image: PyReadonlyArrayDyn<'_, u8>) -> PyResult<isize> {
        let view = view_of(&image)?;
        Ok(self.inner.tell_index(view))
    }

    /// Map each (height, width) shape to the indexes of known images having it.
    fn shape_to_indexes(&self) -> HashMap<(usize, usize), Vec<usize>> {
        self.inner
            .shape_index()
            .iter()
            .map(|bucket| {
                let shape = bucket.shape();
                ((shape.height, shape.width), bucket.indices().to_vec())
            })
            .collect()
    }

    /// Total number of pixel tests stored across all images.
    #[getter]
    fn num_procedures(&self) -> usize {
        self.inner.num_procedures()
    }

    #[getter]
    fn surprises(&self) -> bool {
        self.inner.config().surprises
    }

    fn __len__(&self) -> usize {
        self.inner.len()
    }

    fn __repr__(&self) -> String {
        format!(
            "ImageTeller(images={}, shapes={}, surprises={})",
            self.inner.len(),
            self.inner.shape_index().len(),
            if self.inner.config().surprises {
                "True"
            } else {
                "False"
            }
        )
    }
}

/// Python module for whichimg.
#[pymodule]
fn _whichimg(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<ImageTeller>()?;
    m.add("NOT_FOUND", whichimg::NOT_FOUND)?;
    m.add("__version__", env!("CARGO_PKG_VERSION"))?;
    Ok(())
}
