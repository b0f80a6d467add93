/// Fields of the signup form. Missing fields arrive as `None` and are rejected by validation.
#[derive(FromForm)]
pub struct SignupForm {
    #[field(name = "Username")]
    pub username: Option<String>,
    #[field(name = "Email")]
    pub email: Option<String>,
    #[field(name = "Serie")]
    pub serie: Option<String>
}
