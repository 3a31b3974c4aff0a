//! Draft model for the "Criar Listing" workflow.
//!
//! Products and variations live only in memory while the user edits them;
//! each record carries a client-generated [`Uuid`] that exists purely for
//! list reconciliation (add/remove/edit by id) and never travels to the
//! backend — the durable key, when there is one, is the SKU the user typed.
//!
//! The drafts are generic over the file handle type `F` so the browser can
//! hold `web_sys::File` while tests hold plain strings.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

mod form;

pub use form::{generate_variation_sku, ListingForm, SubmissionBlocker};

/// The ~15 scalar fields of a product, with the backend's wire names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProductFields {
    pub titulo: String,
    pub sku: String,
    pub tipo_marca: String,
    pub nome_marca: String,
    pub preco: String,
    pub fba_dba: String,
    pub id_produto: String,
    pub tipo_id_produto: String,
    pub ncm: String,
    pub quantidade: String,
    pub peso_pacote: String,
    pub c_l_a_pacote: String,
    pub peso_produto: String,
    pub c_l_a_produto: String,
    pub ajuste: String,
}

/// Typed field selector, so the form wiring cannot misspell a field name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductField {
    Titulo,
    Sku,
    TipoMarca,
    NomeMarca,
    Preco,
    FbaDba,
    IdProduto,
    TipoIdProduto,
    Ncm,
    Quantidade,
    PesoPacote,
    ClaPacote,
    PesoProduto,
    ClaProduto,
    Ajuste,
}

impl ProductFields {
    pub fn set(&mut self, field: ProductField, value: String) {
        match field {
            ProductField::Titulo => self.titulo = value,
            ProductField::Sku => self.sku = value,
            ProductField::TipoMarca => self.tipo_marca = value,
            ProductField::NomeMarca => self.nome_marca = value,
            ProductField::Preco => self.preco = value,
            ProductField::FbaDba => self.fba_dba = value,
            ProductField::IdProduto => self.id_produto = value,
            ProductField::TipoIdProduto => self.tipo_id_produto = value,
            ProductField::Ncm => self.ncm = value,
            ProductField::Quantidade => self.quantidade = value,
            ProductField::PesoPacote => self.peso_pacote = value,
            ProductField::ClaPacote => self.c_l_a_pacote = value,
            ProductField::PesoProduto => self.peso_produto = value,
            ProductField::ClaProduto => self.c_l_a_produto = value,
            ProductField::Ajuste => self.ajuste = value,
        }
    }

    pub fn get(&self, field: ProductField) -> &str {
        match field {
            ProductField::Titulo => &self.titulo,
            ProductField::Sku => &self.sku,
            ProductField::TipoMarca => &self.tipo_marca,
            ProductField::NomeMarca => &self.nome_marca,
            ProductField::Preco => &self.preco,
            ProductField::FbaDba => &self.fba_dba,
            ProductField::IdProduto => &self.id_produto,
            ProductField::TipoIdProduto => &self.tipo_id_produto,
            ProductField::Ncm => &self.ncm,
            ProductField::Quantidade => &self.quantidade,
            ProductField::PesoPacote => &self.peso_pacote,
            ProductField::ClaPacote => &self.c_l_a_pacote,
            ProductField::PesoProduto => &self.peso_produto,
            ProductField::ClaProduto => &self.c_l_a_produto,
            ProductField::Ajuste => &self.ajuste,
        }
    }
}

/// Variation kind. The wire values are the backend's (`cor`, `c_l_a_p`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VariationKind {
    #[serde(rename = "cor")]
    Cor,
    #[serde(rename = "c_l_a_p")]
    ClaPeso,
}

impl VariationKind {
    pub fn as_str(self) -> &'static str {
        match self {
            VariationKind::Cor => "cor",
            VariationKind::ClaPeso => "c_l_a_p",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "cor" => Some(VariationKind::Cor),
            "c_l_a_p" => Some(VariationKind::ClaPeso),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariationDraft {
    #[serde(skip, default = "Uuid::new_v4")]
    pub id: Uuid,
    #[serde(default)]
    pub sku: String,
    #[serde(default)]
    pub tipo: Option<VariationKind>,
    #[serde(default)]
    pub cor: String,
    #[serde(default)]
    pub cla: String,
    #[serde(default)]
    pub peso: String,
    #[serde(default)]
    pub imagem: String,
}

impl VariationDraft {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            sku: String::new(),
            tipo: None,
            cor: String::new(),
            cla: String::new(),
            peso: String::new(),
            imagem: String::new(),
        }
    }
}

impl Default for VariationDraft {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariationField {
    Sku,
    Tipo,
    Cor,
    Cla,
    Peso,
    Imagem,
}

impl VariationDraft {
    pub fn set(&mut self, field: VariationField, value: String) {
        match field {
            VariationField::Sku => self.sku = value,
            // An unknown select value means "none chosen".
            VariationField::Tipo => self.tipo = VariationKind::parse(&value),
            VariationField::Cor => self.cor = value,
            VariationField::Cla => self.cla = value,
            VariationField::Peso => self.peso = value,
            VariationField::Imagem => self.imagem = value,
        }
    }
}

/// An extra image slot. The slot exists as a list row before a file is
/// chosen, hence `Option<F>`.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtraImage<F> {
    pub id: Uuid,
    pub file: Option<F>,
}

impl<F> ExtraImage<F> {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            file: None,
        }
    }
}

impl<F> Default for ExtraImage<F> {
    fn default() -> Self {
        Self::new()
    }
}

/// Image attachments of one product. These never enter `products_data`;
/// they travel as separate multipart parts.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageSlots<F> {
    pub principal: Option<F>,
    pub amostra: Option<F>,
    pub extra: Vec<ExtraImage<F>>,
}

impl<F> Default for ImageSlots<F> {
    fn default() -> Self {
        Self {
            principal: None,
            amostra: None,
            extra: Vec::new(),
        }
    }
}

/// One editable product.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductDraft<F> {
    pub id: Uuid,
    pub fields: ProductFields,
    pub variacoes: Vec<VariationDraft>,
    pub imagens: ImageSlots<F>,
}

impl<F> ProductDraft<F> {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            fields: ProductFields::default(),
            variacoes: Vec::new(),
            imagens: ImageSlots::default(),
        }
    }

    /// Builds a draft from an externally supplied record (spreadsheet upload
    /// or organizer output). The draft gets a fresh local id and empty image
    /// slots regardless of what the seed carried.
    pub fn from_seed(seed: ProductSeed) -> Self {
        Self {
            id: Uuid::new_v4(),
            fields: seed.fields,
            variacoes: seed
                .variacoes
                .into_iter()
                .map(|v| VariationDraft {
                    id: Uuid::new_v4(),
                    sku: v.sku,
                    tipo: v.tipo,
                    cor: v.cor,
                    cla: v.cla,
                    peso: v.peso,
                    imagem: v.imagem,
                })
                .collect(),
            imagens: ImageSlots::default(),
        }
    }
}

impl<F> Default for ProductDraft<F> {
    fn default() -> Self {
        Self::new()
    }
}

/// Externally supplied product record; everything optional since upstream
/// sources fill whatever subset they know.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductSeed {
    #[serde(flatten)]
    pub fields: ProductFields,
    #[serde(default)]
    pub variacoes: Vec<VariationSeed>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VariationSeed {
    pub sku: String,
    pub tipo: Option<VariationKind>,
    pub cor: String,
    pub cla: String,
    pub peso: String,
    pub imagem: String,
}

/// Shape of one entry of the `products_data` submission field: the scalar
/// fields plus variations, images stripped.
#[derive(Debug, Serialize)]
pub struct ProductPayload<'a> {
    #[serde(flatten)]
    pub fields: &'a ProductFields,
    pub variacoes: &'a [VariationDraft],
}
