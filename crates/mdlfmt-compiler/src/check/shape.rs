use mdlfmt_core::{Expression, Value};

/// What the checker needs to know about an expression.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Shape<'a> {
    /// Scalars, colors, strings, enums and textures.
    Constant(&'a Value),
    Call {
        result: &'a str,
    },
    Array {
        element: &'a str,
    },
    Vector {
        len: usize,
    },
    /// `rows` is `None` for an empty or ragged matrix.
    Matrix {
        columns: usize,
        rows: Option<usize>,
    },
    Parameter(u32),
    Temporary(u32),
}

impl<'a> Shape<'a> {
    pub fn of(expr: &'a Expression) -> Self {
        match expr {
            Expression::Constant(Value::Vector(components)) => Shape::Vector {
                len: components.len(),
            },
            Expression::Constant(Value::Matrix(columns)) => Shape::matrix(columns),
            Expression::Constant(value) => Shape::Constant(value),
            Expression::Call(call) => Shape::Call {
                result: &call.result.name,
            },
            Expression::Array(array) => Shape::Array {
                element: &array.element.name,
            },
            Expression::Parameter(index) => Shape::Parameter(*index),
            Expression::Temporary(index) => Shape::Temporary(*index),
        }
    }

    pub fn matrix(columns: &[Vec<f32>]) -> Self {
        let rows = columns.first().map(Vec::len);
        let uniform = columns.iter().all(|c| Some(c.len()) == rows);
        Shape::Matrix {
            columns: columns.len(),
            rows: rows.filter(|_| uniform),
        }
    }

    /// Type spelling of the shape, for diagnostics.
    pub fn describe(&self) -> String {
        match self {
            Shape::Constant(value) => constant_type(value),
            Shape::Call { result } => (*result).to_string(),
            Shape::Array { element } => format!("{element}[]"),
            Shape::Vector { len } => format!("float{len}"),
            Shape::Matrix {
                columns,
                rows: Some(rows),
            } => format!("float{columns}x{rows}"),
            Shape::Matrix { columns, rows: None } => format!("ragged matrix of {columns} columns"),
            Shape::Parameter(index) => format!("parameter {index}"),
            Shape::Temporary(index) => format!("temporary {index}"),
        }
    }
}

/// Declared type spelling of a constant.
pub(super) fn constant_type(value: &Value) -> String {
    match value {
        Value::Bool(_) => "bool".into(),
        Value::Int(_) => "int".into(),
        Value::Float(_) => "float".into(),
        Value::String(_) => "string".into(),
        Value::Color(_) => "color".into(),
        Value::Texture(_) => "texture_2d".into(),
        Value::Enum(e) => e.ty.name.clone(),
        Value::Vector(components) => format!("float{}", components.len()),
        Value::Matrix(columns) => Shape::matrix(columns).describe(),
    }
}

/// Component count of a `floatN` spelling.
pub fn vector_size(type_name: &str) -> Option<usize> {
    type_name
        .strip_prefix("float")?
        .parse::<usize>()
        .ok()
        .filter(|&n| n > 0)
}

/// `(columns, rows)` of a `floatNxM` spelling.
pub fn matrix_size(type_name: &str) -> Option<(usize, usize)> {
    let (columns, rows) = type_name.strip_prefix("float")?.split_once('x')?;
    let columns = columns.parse::<usize>().ok().filter(|&n| n > 0)?;
    let rows = rows.parse::<usize>().ok().filter(|&n| n > 0)?;
    Some((columns, rows))
}
