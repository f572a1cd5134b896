mod assignments;
pub use assignments::{Assignment, Assignments};

mod delete;
pub use delete::Delete;

mod direction;
pub use direction::Direction;

mod expr;
pub use expr::Expr;

mod expr_and;
pub use expr_and::ExprAnd;

mod expr_binary_op;
pub use expr_binary_op::{BinaryOp, ExprBinaryOp};

mod expr_column;
pub use expr_column::ExprColumn;

mod expr_concat;
pub use expr_concat::ExprConcat;

mod expr_func;
pub use expr_func::{ExprFunc, Func};

mod expr_like;
pub use expr_like::ExprLike;

mod insert;
pub use insert::Insert;

mod order_by;
pub use order_by::{OrderBy, OrderByExpr};

mod select;
pub use select::Select;

mod source;
pub use source::{Join, Source};

mod statement;
pub use statement::Statement;

mod ty;
pub use ty::Type;

mod update;
pub use update::Update;

mod value;
pub use value::Value;

mod value_record;
pub use value_record::ValueRecord;
