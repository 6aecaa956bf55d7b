#[derive(Clone)]
pub enum Role {
    Admin,
    FutureAdmin,
    OperationsAdmin,
}
