use once_cell::sync::Lazy;
use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct MessageDoc { pub message: String }

#[derive(ToSchema)]
pub struct ProductDoc { pub id: i32, pub name: String, pub description: String, pub price: f64, pub quantity: i32 }

#[derive(ToSchema)]
#[schema(rename_all = "lowercase")]
pub enum GenderDoc { Male, Female, Others }

#[derive(ToSchema)]
pub struct PatientDoc {
    #[schema(example = "P001")]
    pub id: String,
    pub name: String,
    pub city: String,
    pub age: i32,
    pub gender: GenderDoc,
    /// metres
    pub height: f64,
    /// kilograms
    pub weight: f64,
}

#[derive(ToSchema)]
pub struct PatientUpdateDoc {
    pub name: Option<String>,
    pub city: Option<String>,
    pub age: Option<i32>,
    pub gender: Option<GenderDoc>,
    pub height: Option<f64>,
    pub weight: Option<f64>,
}

#[derive(ToSchema)]
pub struct PatientViewDoc {
    pub id: String,
    pub name: String,
    pub city: String,
    pub age: i32,
    pub gender: GenderDoc,
    pub height: f64,
    pub weight: f64,
    pub bmi: f64,
    /// underweight, normal, overweight or obese
    pub verdict: String,
}

#[derive(ToSchema)]
pub struct EmployeeDoc { pub id: i64, pub name: String, pub age: i32, pub department: String }

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::home,
        crate::routes::about,
        crate::routes::health,
        crate::routes::products::list_products,
        crate::routes::products::get_product,
        crate::routes::products::create_product,
        crate::routes::products::update_product,
        crate::routes::products::delete_product,
        crate::routes::patients::view_patients,
        crate::routes::patients::get_patient,
        crate::routes::patients::sort_patients,
        crate::routes::patients::create_patient,
        crate::routes::patients::edit_patient,
        crate::routes::patients::delete_patient,
        crate::routes::employees::list_employees,
        crate::routes::employees::get_employee,
        crate::routes::employees::create_employee,
        crate::routes::employees::update_employee,
        crate::routes::employees::delete_employee,
    ),
    components(
        schemas(
            HealthResponse,
            MessageDoc,
            ProductDoc,
            GenderDoc,
            PatientDoc,
            PatientUpdateDoc,
            PatientViewDoc,
            EmployeeDoc,
        )
    ),
    tags(
        (name = "meta"),
        (name = "products"),
        (name = "patients"),
        (name = "employees")
    )
)]
pub struct ApiDoc;

/// 文档只生成一次，之后每次请求直接克隆
pub static OPENAPI: Lazy<utoipa::openapi::OpenApi> = Lazy::new(ApiDoc::openapi);
