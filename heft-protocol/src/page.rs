//! Index page served at `/`
//!
//! Polls `/api/state` twice a second and posts the item label form to
//! `/api/item`.

pub const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>Heft</title>
<style>
body{margin:0;min-height:100vh;display:flex;align-items:center;justify-content:center;background:#0b0f14;color:#e8eef4;font-family:system-ui,sans-serif}
.card{width:min(92vw,380px);padding:20px;border-radius:16px;background:#141b23}
h1{margin:0 0 12px;font-size:1.2rem;color:#27e3a5}
.weight{font-size:3rem;font-weight:700}
.meta{display:flex;justify-content:space-between;font-size:.8rem;opacity:.7;margin-top:12px}
input,button{width:100%;box-sizing:border-box;margin-top:8px;padding:8px;border-radius:8px;border:0;font-size:1rem}
button{background:#27e3a5;color:#0b0f14;font-weight:600}
</style>
</head>
<body>
<div class="card">
<h1>Heft</h1>
<div><span class="weight" id="weight">0.00</span> <span>raw</span></div>
<div>Item: <span id="item">-</span></div>
<form id="itemForm">
<input id="itemInput" name="item" maxlength="32" placeholder="What are you weighing?">
<button type="submit">Save item</button>
</form>
<div class="meta"><span id="updated">Updated: -</span><span id="rssi">RSSI: -- dBm</span></div>
</div>
<script>
async function poll(){
  try{
    const r=await fetch('/api/state');
    if(!r.ok)return;
    const d=await r.json();
    document.getElementById('weight').textContent=d.weight===null?'--':d.weight.toFixed(2);
    document.getElementById('item').textContent=d.item||'-';
    document.getElementById('rssi').textContent='RSSI: '+d.rssi+' dBm';
    document.getElementById('updated').textContent='Updated: '+new Date().toLocaleTimeString();
  }catch(e){}
}
document.getElementById('itemForm').addEventListener('submit',async e=>{
  e.preventDefault();
  const body=new URLSearchParams({item:document.getElementById('itemInput').value.trim()});
  await fetch('/api/item',{method:'POST',headers:{'Content-Type':'application/x-www-form-urlencoded'},body:body.toString()});
  poll();
});
poll();
setInterval(poll,500);
</script>
</body>
</html>
"#;
