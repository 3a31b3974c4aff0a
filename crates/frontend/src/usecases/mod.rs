pub mod configuracoes;
pub mod criar_listing;
pub mod extrair_imagens;
pub mod organizador;
