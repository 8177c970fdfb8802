use crate::error::LaunchResult;
use crate::requirements::Requirements;
use crate::ser;

use super::dtype::DataType;
use super::point::PointArg;
use super::region_field::RegionFieldArg;
use super::scalar::ScalarArg;
use super::shape::ShapeArg;

/// One entry of a launch's argument list.
#[derive(Debug, Clone, PartialEq)]
pub enum Argument {
    /// Scalar value or homogeneous array.
    Scalar(ScalarArg),
    /// Data type tag, packed as its `i32` code.
    Dtype(DataType),
    /// Typed or untyped point.
    Point(PointArg),
    /// Deferred region-field reference.
    RegionField(RegionFieldArg),
}

impl Argument {
    /// Appends the argument, resolving region-field references against `requirements`.
    pub fn pack(&self, out: &mut Vec<u8>, requirements: &Requirements) -> LaunchResult<()> {
        match self {
            Argument::Scalar(arg) => arg.pack(out)?,
            Argument::Dtype(dtype) => ser::write_i32(out, dtype.code()),
            Argument::Point(arg) => arg.pack(out)?,
            Argument::RegionField(arg) => arg.pack(out, requirements)?,
        }
        Ok(())
    }
}

/// Append-only argument list, packed in insertion order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArgumentEncoder {
    args: Vec<Argument>,
}

impl ArgumentEncoder {
    /// Creates an empty encoder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an argument.
    pub fn push(&mut self, arg: Argument) {
        self.args.push(arg);
    }

    /// Appends a scalar argument.
    pub fn push_scalar(&mut self, arg: ScalarArg) {
        self.push(Argument::Scalar(arg));
    }

    /// Appends the scalar arguments a shape expands into.
    pub fn push_shape(&mut self, shape: &ShapeArg) {
        for arg in shape.to_arguments() {
            self.push_scalar(arg);
        }
    }

    /// Number of arguments.
    pub fn len(&self) -> usize {
        self.args.len()
    }

    /// Returns `true` when no argument was added.
    pub fn is_empty(&self) -> bool {
        self.args.is_empty()
    }

    /// Arguments in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Argument> {
        self.args.iter()
    }

    /// Packs every argument into one buffer.
    pub fn pack(&self, requirements: &Requirements) -> LaunchResult<ArgBuffer> {
        let mut bytes = Vec::new();
        for arg in &self.args {
            arg.pack(&mut bytes, requirements)?;
        }
        Ok(ArgBuffer { bytes })
    }
}

/// Packed argument bytes of one launch.
///
/// The buffer moves from the launcher into the task object and from there into
/// the dispatcher; it is never shared.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArgBuffer {
    bytes: Vec<u8>,
}

impl ArgBuffer {
    /// Wraps already packed bytes.
    pub fn new(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    /// Packed bytes.
    pub fn as_slice(&self) -> &[u8] {
        &self.bytes
    }

    /// Number of packed bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Returns `true` when the launch has no arguments.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Consumes the buffer and returns its bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

impl AsRef<[u8]> for ArgBuffer {
    fn as_ref(&self) -> &[u8] {
        self.as_slice()
    }
}
