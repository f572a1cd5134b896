use super::Formatter;
use crumb_core::stmt::{Expr, Func};

impl Formatter<'_> {
    pub(super) fn expr(&mut self, expr: &Expr) {
        match expr {
            Expr::And(e) => {
                for (i, operand) in e.operands.iter().enumerate() {
                    if i > 0 {
                        self.push(" AND ");
                    }
                    self.expr(operand);
                }
            }
            Expr::BinaryOp(e) => {
                self.expr(&e.lhs);
                self.push(" ");
                self.push(e.op.to_sql_str());
                self.push(" ");
                self.expr(&e.rhs);
            }
            Expr::Column(e) => self.column(e.column),
            Expr::Concat(e) => {
                self.push("(");
                for (i, operand) in e.exprs.iter().enumerate() {
                    if i > 0 {
                        self.push(" || ");
                    }
                    self.expr(operand);
                }
                self.push(")");
            }
            Expr::Func(e) => match e.func {
                Func::Count => self.push("COUNT(*)"),
                Func::JsonPatch => {
                    self.push("json_patch(");
                    self.expr(&e.args[0]);
                    self.push(", ");
                    self.expr(&e.args[1]);
                    self.push(")");
                }
                Func::Lower => {
                    self.push("LOWER(");
                    self.expr(&e.args[0]);
                    self.push(")");
                }
            },
            Expr::Like(e) => {
                self.expr(&e.expr);
                self.push(" LIKE ");
                self.expr(&e.pattern);
            }
            Expr::Value(value) => self.value(value.clone()),
        }
    }
}
