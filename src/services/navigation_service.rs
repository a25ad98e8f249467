// src/services/navigation_service.rs

use crate::{
    middleware::{auth::SessionClaims, modules},
    models::navigation::MenuEntry,
};

const fn entry(
    section: &'static str,
    label: &'static str,
    href: &'static str,
    module: Option<&'static str>,
) -> MenuEntry {
    MenuEntry { label, href, section, module }
}

/// Catálogo fixo do menu lateral.
pub static MENU: &[MenuEntry] = &[
    entry("Geral", "Dashboard", "/dashboard", None),
    entry("Geral", "Leitor QR", "/dashboard/scanner", None),
    // Cadastros
    entry("Cadastros", "Clientes", "/dashboard/clientes", Some(modules::CADASTROS)),
    entry("Cadastros", "Obras", "/dashboard/obras", Some(modules::CADASTROS)),
    entry("Cadastros", "Operadores", "/dashboard/operadores", Some(modules::CADASTROS)),
    entry("Cadastros", "Técnicos", "/dashboard/tecnicos", Some(modules::CADASTROS)),
    // Equipamentos
    entry("Equipamentos", "Equipamentos", "/dashboard/equipamentos", Some(modules::EQUIPAMENTOS)),
    entry("Equipamentos", "Tipos de Equipamento", "/dashboard/tipos-equipamento", Some(modules::EQUIPAMENTOS)),
    // Manutenção
    entry("Manutenção", "Modelos de Manutenção", "/dashboard/manutencao/modelos", Some(modules::MANUTENCAO)),
    entry("Manutenção", "Programações", "/dashboard/manutencao", Some(modules::MANUTENCAO)),
    entry("Manutenção", "Vencimentos", "/dashboard/manutencao/vencimentos", Some(modules::MANUTENCAO)),
    // NR12
    entry("NR12", "Checklists", "/dashboard/nr12/checklists", Some(modules::NR12)),
    // Almoxarifado
    entry("Almoxarifado", "Produtos", "/dashboard/almoxarifado/produtos", Some(modules::ALMOXARIFADO)),
    entry("Almoxarifado", "Movimentações", "/dashboard/almoxarifado/movimentacoes", Some(modules::ALMOXARIFADO)),
    entry("Almoxarifado", "Posição de Estoque", "/dashboard/almoxarifado/posicao", Some(modules::ALMOXARIFADO)),
    // Financeiro
    entry("Financeiro", "Contas a Pagar", "/dashboard/financeiro/contas-pagar", Some(modules::FINANCEIRO)),
    entry("Financeiro", "Contas a Receber", "/dashboard/financeiro/contas-receber", Some(modules::FINANCEIRO)),
    entry("Financeiro", "Fluxo de Caixa", "/dashboard/financeiro/fluxo-caixa", Some(modules::FINANCEIRO)),
    entry("Financeiro", "Inadimplência", "/dashboard/financeiro/inadimplencia", Some(modules::FINANCEIRO)),
    // Compras
    entry("Compras", "Pedidos de Compra", "/dashboard/compras/pedidos", Some(modules::COMPRAS)),
    // Fio diamantado
    entry("Fio Diamantado", "Fios", "/dashboard/fio-diamantado/fios", Some(modules::FIO_DIAMANTADO)),
    entry("Fio Diamantado", "Cortes", "/dashboard/fio-diamantado/cortes", Some(modules::FIO_DIAMANTADO)),
    entry("Fio Diamantado", "Rendimento", "/dashboard/fio-diamantado/rendimento", Some(modules::FIO_DIAMANTADO)),
    // Abastecimento
    entry("Abastecimento", "Abastecimentos", "/dashboard/abastecimento", Some(modules::ABASTECIMENTO)),
    entry("Abastecimento", "Consumo", "/dashboard/abastecimento/consumo", Some(modules::ABASTECIMENTO)),
];

/// Entradas visíveis para a sessão, na ordem do catálogo.
pub fn visible_menu(claims: &SessionClaims) -> Vec<MenuEntry> {
    MENU.iter()
        .filter(|e| e.module.is_none_or(|slug| claims.has_module(slug)))
        .cloned()
        .collect()
}
